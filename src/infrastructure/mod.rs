pub mod fs_store;
pub mod textarea_doc;

pub use fs_store::FsNoteStore;
pub use textarea_doc::TextAreaDocument;
