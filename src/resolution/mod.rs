/// Load-path based file resolution module.
///
/// Turns relative references into concrete on-disk files by probing an
/// ordered list of search roots and an ordered list of file extensions.
mod resolver;

pub use resolver::PathResolver;
