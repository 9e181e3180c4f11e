pub mod hit;
pub mod input;
pub mod reclass;
pub mod session;
pub mod shortcuts;
pub mod snap;

pub use input::{InputEvent, Modifiers};
pub use reclass::{ColorCountReclassifier, NoReclassify, StationReclassifier};
pub use session::{EditorSession, Tool};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use snap::{SnapAxis, SnapLine, SnapPoint, SnapTracker, candidate_lines};
