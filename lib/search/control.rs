use crate::util::{Counter, Timer, Trigger};
use derive_more::{Display, Error};

/// Indicates the enumeration was interrupted.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Error)]
#[display(fmt = "the enumeration was interrupted")]
pub struct Interrupted;

/// Bounds an enumeration of the game tree.
///
/// The same control is shared by every branch of a parallel enumeration.
#[derive(Debug, Default)]
pub enum Control<'a> {
    #[default]
    Unlimited,
    Limited(&'a Counter, &'a Timer, &'a Trigger),
}

impl Control<'_> {
    /// Accounts for a node about to be expanded.
    ///
    /// Once this fails, it fails for every other branch sharing the control.
    #[inline(always)]
    pub fn expand(&self) -> Result<(), Interrupted> {
        let Control::Limited(nodes, timer, trigger) = self else {
            return Ok(());
        };

        if trigger.is_pulled() {
            return Err(Interrupted);
        }

        match (nodes.count(), timer.remaining()) {
            (Some(_), Some(_)) => Ok(()),
            _ => {
                trigger.pull();
                Err(Interrupted)
            }
        }
    }

    /// How many nodes have been expanded, if counted.
    pub fn expanded(&self) -> Option<u64> {
        match self {
            Control::Unlimited => None,
            Control::Limited(nodes, _, _) => Some(nodes.counted()),
        }
    }
}
