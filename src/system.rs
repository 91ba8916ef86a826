pub mod pasteboard;
