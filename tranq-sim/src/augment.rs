use crate::errors::Result;
use crate::models::{Batch, SimulatedRead};

///
/// Double a batch with reverse-complement copies.
///
/// For every read present when called, appends a read whose sequence is the
/// reverse complement and whose labels are reversed. Originals keep their
/// positions, so read `i` pairs with read `i + n` afterwards.
///
/// Fails without touching the batch if any read holds a base that can't be
/// complemented.
///
pub fn augment_reverse_complement(batch: &mut Batch) -> Result<()> {
    let augmented = batch
        .reads
        .iter()
        .map(SimulatedRead::reverse_complement)
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Appending {} reverse-complement reads", augmented.len());
    batch.reads.extend(augmented);

    Ok(())
}
