pub mod blockchain;
pub mod config;
pub mod external_list;
pub mod logger;
pub mod storage;
