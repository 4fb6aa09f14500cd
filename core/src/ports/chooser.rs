//! Location chooser port (interface).

use crate::domain::NamespaceLocation;
use crate::error::Result;

/// Port for picking one location out of several candidates.
///
/// Implementations usually block on operator input.
pub trait LocationChooser {
    /// Return exactly one of `candidates`.
    fn choose(&mut self, candidates: &[NamespaceLocation]) -> Result<NamespaceLocation>;
}
