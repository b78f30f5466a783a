// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive CLI.
//
// Module responsibilities:
// - `api`: blocking HTTP client for the SpaceX v4 API and the provider
//   trait the store fetches through.
// - `store`: the local information store: fetch pass, cached collection
//   files, launch filtering, derived summaries.
// - `stats`: derived counter types (entity summaries and the year/month
//   launch histograms).
// - `menu`: menu descriptors and the navigation loop.
// - `ui`: terminal rendering and the numbered choice prompt.
pub mod api;
pub mod menu;
pub mod stats;
pub mod store;
pub mod ui;
