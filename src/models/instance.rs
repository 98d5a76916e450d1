//! Compute instance and its nested records

use super::instance_source::InstanceSourceDetails;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

crate::wire_enum! {
    pub enum InstanceLifecycleState {
        Moving = "MOVING",
        Provisioning = "PROVISIONING",
        Running = "RUNNING",
        Starting = "STARTING",
        Stopping = "STOPPING",
        Stopped = "STOPPED",
        CreatingImage = "CREATING_IMAGE",
        Terminating = "TERMINATING",
        Terminated = "TERMINATED",
    }
}

crate::wire_enum! {
    /// Power actions the caller may perform on the instance
    pub enum InstanceAction {
        Stop = "STOP",
        Start = "START",
        SoftReset = "SOFTRESET",
        Reset = "RESET",
        SoftStop = "SOFTSTOP",
        SendDiagnosticInterrupt = "SENDDIAGNOSTICINTERRUPT",
    }
}

crate::wire_enum! {
    /// Baseline CPU share of a burstable shape
    pub enum BaselineOcpuUtilization {
        OneEighth = "BASELINE_1_8",
        OneHalf = "BASELINE_1_2",
        Full = "BASELINE_1_1",
    }
}

crate::wire_enum! {
    pub enum VnicAttachmentLifecycleState {
        Attaching = "ATTACHING",
        Attached = "ATTACHED",
        Detaching = "DETACHING",
        Detached = "DETACHED",
    }
}

crate::wire_model! {
    pub struct InstanceShapeConfig {
        ocpus: f64 => "ocpus",
        memory_in_gbs: f64 => "memoryInGBs",
        baseline_ocpu_utilization: BaselineOcpuUtilization => "baselineOcpuUtilization",
        gpus: i64 => "gpus",
        networking_bandwidth_in_gbps: f64 => "networkingBandwidthInGbps",
        processor_description: String => "processorDescription",
    }
}

crate::wire_model! {
    pub struct VnicAttachment {
        id: String => "id",
        vnic_id: String => "vnicId",
        display_name: String => "displayName",
        lifecycle_state: VnicAttachmentLifecycleState => "lifecycleState",
        nic_index: i64 => "nicIndex",
        vlan_tag: i64 => "vlanTag",
        time_created: DateTime<Utc> => "timeCreated",
    }
}

crate::wire_model! {
    /// A compute instance
    pub struct Instance {
        id: String => "id",
        compartment_id: String => "compartmentId",
        availability_domain: String => "availabilityDomain",
        display_name: String => "displayName",
        shape: String => "shape",
        lifecycle_state: InstanceLifecycleState => "lifecycleState",
        shape_config: InstanceShapeConfig => "shapeConfig",
        source_details: InstanceSourceDetails => "sourceDetails",
        vnic_attachments: Vec<VnicAttachment> => "vnicAttachments",
        allowed_actions: Vec<InstanceAction> => "allowedActions",
        metadata: BTreeMap<String, String> => "metadata",
        extended_metadata: BTreeMap<String, Value> => "extendedMetadata",
        freeform_tags: BTreeMap<String, String> => "freeformTags",
        defined_tags: BTreeMap<String, BTreeMap<String, Value>> => "definedTags",
        is_live_migration_preferred: bool => "isLiveMigrationPreferred",
        time_created: DateTime<Utc> => "timeCreated",
        time_maintenance_reboot_due: DateTime<Utc> => "timeMaintenanceRebootDue",
    }
}

impl Instance {
    /// Whether `action` is listed in `allowedActions`
    pub fn allows(&self, action: InstanceAction) -> bool {
        self.allowed_actions
            .get()
            .is_some_and(|actions| actions.contains(&action))
    }
}
