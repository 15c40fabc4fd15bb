//! Per-track present value accumulator.

use rayon::prelude::*;
use tabula_models::process::PATH_BLOCK;
use tabula_models::timetable::Op;

/// Running present value of every track, one vector of length `n_paths`
/// per track.
///
/// Vectors start at zero and are only reduced to scalars after the walk.
/// Each track also records how many events have written it and the time of
/// the latest write.
#[derive(Debug, Clone)]
pub struct Ledger {
    tracks: Vec<Vec<f64>>,
    writes: Vec<usize>,
    last_write: Vec<Option<f64>>,
}

impl Ledger {
    /// Zeroed ledger with `n_tracks` tracks of `n_paths` paths.
    pub fn new(n_tracks: usize, n_paths: usize) -> Self {
        Self {
            tracks: vec![vec![0.0; n_paths]; n_tracks],
            writes: vec![0; n_tracks],
            last_write: vec![None; n_tracks],
        }
    }

    /// Combine `flows` into track `track` with `op`, path by path.
    ///
    /// # Panics
    ///
    /// Panics if `flows` does not have one entry per path.
    pub fn apply(&mut self, track: usize, time: f64, op: Op, flows: &[f64]) {
        let values = &mut self.tracks[track];
        assert_eq!(values.len(), flows.len(), "one flow per path");
        values
            .par_chunks_mut(PATH_BLOCK)
            .zip(flows.par_chunks(PATH_BLOCK))
            .for_each(|(values, flows)| {
                for (value, &flow) in values.iter_mut().zip(flows) {
                    *value = op.combine(*value, flow);
                }
            });
        self.writes[track] += 1;
        self.last_write[track] = Some(time);
    }

    /// Current per-path values of `track`.
    #[inline]
    pub fn track(&self, track: usize) -> &[f64] {
        &self.tracks[track]
    }

    /// Number of writes to `track` so far.
    #[inline]
    pub fn writes(&self, track: usize) -> usize {
        self.writes[track]
    }

    /// Time of the latest write to `track`.
    #[inline]
    pub fn last_write(&self, track: usize) -> Option<f64> {
        self.last_write[track]
    }

    /// Number of tracks.
    #[inline]
    pub fn n_tracks(&self) -> usize {
        self.tracks.len()
    }

    /// Consume the ledger, returning the per-track vectors.
    pub fn into_tracks(self) -> Vec<Vec<f64>> {
        self.tracks
    }
}
