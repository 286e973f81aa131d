//! Union-find connectivity engine and multi-column entity-resolution driver.
//!
//! Four building blocks, bottom-up: a disjoint-set forest (`dsf`), a node
//! interner mapping sparse external ids onto a dense index space
//! (`interner`), a component labeller (`labeller`), and the two public
//! drivers built on top of them (`graph` for edge-list connectivity,
//! `entity` for column-based entity resolution).

pub mod config;
pub mod dsf;
pub mod entity;
pub mod errors;
pub mod graph;
pub mod interner;
pub mod labeller;

pub use config::EngineConfig;
pub use entity::{group_id, EntityResolution, EntityResolutionRequest, DEFAULT_INCOMPARABLES};
pub use errors::EngineError;
pub use graph::{are_connected, edge_components, find_connected_components, ConnectedComponents, EdgeComponents};
pub use labeller::Labelling;

pub use graph_types::{ColumnValue, ComponentId, Edge, IndexInt, NodeId};
