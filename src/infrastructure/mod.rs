pub mod audio;
pub mod media;
pub mod notification;
pub mod observability;
pub mod persistence;
pub mod storage;
