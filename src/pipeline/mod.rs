// Pipelines — the flows that touch the submission store.
//
// intake: validate + score + append a new pulse
// recluster: one clustering pass over the stored collection
// watch: timer-driven recluster loop with optional simulated pulses

pub mod intake;
pub mod recluster;
pub mod watch;
