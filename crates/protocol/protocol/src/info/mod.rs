//! The L1 attributes deposit, the first transaction of every non-genesis L2 block.
//!
//! Each layout is told apart by its 4-byte selector, and each has a fixed calldata length.

mod variant;
pub use variant::L1BlockInfoTx;

mod bedrock;
pub use bedrock::L1BlockInfoBedrock;

mod ecotone;
pub use ecotone::L1BlockInfoEcotone;

mod isthmus;
pub use isthmus::L1BlockInfoIsthmus;

mod errors;
pub use errors::DecodeError;

/// Copies `N` bytes of length-checked calldata starting at `offset`.
fn read_array<const N: usize>(r: &[u8], offset: usize) -> [u8; N] {
    let mut buf = [0u8; N];
    buf.copy_from_slice(&r[offset..offset + N]);
    buf
}
