//! `lp-baseline` — the k-nearest-neighbor baseline forecaster.
//!
//! A deliberately simple reference predictor for cached scenes: each agent's
//! future is a constant-displacement extrapolation of its final observed
//! step, optionally blended with the final displacements of its `n_neigh`
//! nearest social neighbors.  It exists to put a floor under the learned
//! forecaster's metrics, so it uses only the cached tensors — no map, no
//! training.
//!
//! Predictions are returned in world coordinates (the frame `gt_preds` is
//! stored in), mapped back through the scene's `rot`/`orig`.

pub mod knn;

#[cfg(test)]
mod tests;

pub use knn::KnnForecaster;
