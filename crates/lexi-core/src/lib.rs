pub mod candidates;
pub mod html;
pub mod ocr;
pub mod overlay;
pub mod pos;
pub mod preprocess;
pub mod script;
pub mod store;

pub use candidates::CandidateIndex;
pub use overlay::{Annotated, Node, Overlay, OverlayAttrs, OverlayMapper};
pub use pos::{is_interactive_pos, pos_description};
pub use script::ScriptClass;
pub use store::{DEFAULT_KNOWN_COLOR, WordEntry, WordStore};
