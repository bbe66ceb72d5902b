#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod traits;
pub use traits::Hardfork;

mod errors;
pub use errors::HardforkError;

mod artifacts;
pub use artifacts::UpgradeBytecode;

mod forks;
pub use forks::Hardforks;

mod ecotone;
pub use ecotone::Ecotone;

mod fjord;
pub use fjord::Fjord;

mod isthmus;
pub use isthmus::Isthmus;

mod utils;
