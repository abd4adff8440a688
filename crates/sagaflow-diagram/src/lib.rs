//! Sagaflow Diagram
//!
//! This crate contains the raw process diagram types for sagaflow. These types
//! mirror the BPMN element tree as it comes out of the markup parser, before
//! any kind tagging, annotation lookup or edge resolution has happened.
//!
//! Diagrams can be:
//! - parsed from BPMN 2.0 XML with [`Diagram::from_xml`]
//! - built programmatically (every type implements `Default`)
//!
//! The resolver turns a `Diagram` into a resolved node graph. Nothing in this
//! crate interprets expressions or follows references.

mod element;
mod error;
mod flow;
mod process;

pub use element::{
  EventElement, GatewayElement, MessageEventDefinition, ServiceTaskElement, TaskElement,
};
pub use error::DiagramError;
pub use flow::{Association, SequenceFlow, TextAnnotation};
pub use process::{Diagram, Process};
