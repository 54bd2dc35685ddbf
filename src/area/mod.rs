//! Named rectangular regions and the two-click selection protocol.

pub mod manager;
