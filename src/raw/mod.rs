mod arena;
mod height;
mod node;
mod trail;

pub(crate) use arena::{Arena, Handle};
pub(crate) use node::{Link, Node};
pub(crate) use trail::Trail;
