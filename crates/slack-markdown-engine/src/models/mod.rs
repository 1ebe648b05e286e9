pub mod attachment;
pub mod blocks;
pub mod file;
pub mod message;

pub use attachment::{Attachment, AttachmentField, EpochSeconds};
pub use blocks::*;
pub use file::File;
pub use message::{EditRecord, Message, NameTable, Reaction};
