//! Cloud API models
//!
//! Representative generated models: enough of a cloud SDK surface to cover
//! nested models, arrays of models, maps, enum lists, and two polymorphic
//! families (one keyed on `type`, one on `sourceType`).

mod instance;
mod instance_source;
mod project;
mod traffic_node;

pub use instance::{
    BaselineOcpuUtilization, Instance, InstanceAction, InstanceLifecycleState, InstanceShapeConfig,
    VnicAttachment, VnicAttachmentLifecycleState,
};
pub use instance_source::{
    InstanceSourceDetails, InstanceSourceDetailsBase, InstanceSourceKind,
    InstanceSourceViaBootVolumeDetails, InstanceSourceViaImageDetails,
};
pub use project::{active_projects, Project, ProjectLifecycleState, ResourceId};
pub use traffic_node::{
    AccessDeniedTrafficNode, EgressTrafficSpec, InvisibleTrafficNode, PathAnalysisResult,
    RoutingAction, RoutingActionKind, SecurityAction, SecurityActionKind, TrafficEntityType,
    TrafficNode, TrafficNodeBase, TrafficNodeKind, TrafficProtocol, TrafficRoute,
    VisibleTrafficNode,
};
