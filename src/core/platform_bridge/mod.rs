//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges hosts (windowing layer, image loaders, renderers reporting
// interactions) with the engine core.
//
// Everything a host wants to tell the engine travels as a `HostEvent`
// over an unbounded channel and is applied at the top of the next tick,
// so hosts never touch engine state directly and never block.
//
// Components:
// - `interface`: the `HostEvent` contract
// - `event_collector`: core-side draining of the channel
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub(crate) use event_collector::EventCollector;
pub use interface::HostEvent;
