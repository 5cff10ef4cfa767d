pub mod connectivity;
pub mod storage;
