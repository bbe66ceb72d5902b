#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod logs;
pub use logs::{FileLogConfig, LogConfig, LogRotation, StdoutLogConfig};

mod tracing;
pub use tracing::{LOG_FILE_NAME, LogFormat, init_test_tracing};
