//! Network path analysis: traffic nodes and routes
//!
//! `TrafficNode` is polymorphic on `type`: a path analysis reports each hop as
//! visible, invisible (outside the caller's view) or access denied.

use crate::error::Result;
use crate::model::{
    hydrate_polymorphic, DynModel, FromWire, Hydrator, KeyStyle, Model, Polymorphic, ToPlain,
    TypeDesc,
};
use serde_json::{Map, Value};

crate::wire_enum! {
    pub enum TrafficProtocol {
        Tcp = "TCP",
        Udp = "UDP",
        Icmp = "ICMP",
        IcmpV6 = "ICMP_V6",
        All = "ALL",
    }
}

crate::wire_enum! {
    pub enum RoutingActionKind {
        Forwarded = "FORWARDED",
        NoRoute = "NO_ROUTE",
        Indeterminate = "INDETERMINATE",
    }
}

crate::wire_enum! {
    pub enum SecurityActionKind {
        Allowed = "ALLOWED",
        Denied = "DENIED",
    }
}

crate::wire_enum! {
    pub enum TrafficEntityType {
        Vcn = "VCN",
        Subnet = "SUBNET",
        Vnic = "VNIC",
        Instance = "INSTANCE",
        InternetGateway = "INTERNET_GATEWAY",
        NatGateway = "NAT_GATEWAY",
        ServiceGateway = "SERVICE_GATEWAY",
        Drg = "DRG",
        LoadBalancer = "LOAD_BALANCER",
        NetworkSecurityGroup = "NETWORK_SECURITY_GROUP",
    }
}

crate::wire_model! {
    pub struct EgressTrafficSpec {
        traffic_protocol: TrafficProtocol => "trafficProtocol",
        protocol: i64 => "protocol",
        source_address: String => "sourceAddress",
        destination_address: String => "destinationAddress",
    }
}

crate::wire_model! {
    pub struct RoutingAction {
        action: RoutingActionKind => "action",
        action_type: String => "actionType",
        description: String => "description",
    }
}

crate::wire_model! {
    pub struct SecurityAction {
        action: SecurityActionKind => "action",
        action_type: String => "actionType",
    }
}

crate::wire_model! {
    /// A node whose `type` this client does not recognize
    pub struct TrafficNodeBase {
        type_: String => "type" as "type",
        egress_traffic: EgressTrafficSpec => "egressTraffic",
        next_hop_routing_action: RoutingAction => "nextHopRoutingAction",
        egress_security_action: SecurityAction => "egressSecurityAction",
        ingress_security_action: SecurityAction => "ingressSecurityAction",
    }
}

crate::wire_model! {
    pub struct VisibleTrafficNode {
        type_: String => "type" as "type",
        egress_traffic: EgressTrafficSpec => "egressTraffic",
        next_hop_routing_action: RoutingAction => "nextHopRoutingAction",
        egress_security_action: SecurityAction => "egressSecurityAction",
        ingress_security_action: SecurityAction => "ingressSecurityAction",
        entity_id: String => "entityId",
        entity_type: TrafficEntityType => "entityType",
        display_name: String => "displayName",
    }
}

crate::wire_model! {
    pub struct InvisibleTrafficNode {
        type_: String => "type" as "type",
        egress_traffic: EgressTrafficSpec => "egressTraffic",
        next_hop_routing_action: RoutingAction => "nextHopRoutingAction",
        egress_security_action: SecurityAction => "egressSecurityAction",
        ingress_security_action: SecurityAction => "ingressSecurityAction",
    }
}

crate::wire_model! {
    pub struct AccessDeniedTrafficNode {
        type_: String => "type" as "type",
        egress_traffic: EgressTrafficSpec => "egressTraffic",
        next_hop_routing_action: RoutingAction => "nextHopRoutingAction",
        egress_security_action: SecurityAction => "egressSecurityAction",
        ingress_security_action: SecurityAction => "ingressSecurityAction",
        entity_id: String => "entityId",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrafficNodeKind {
    Visible,
    Invisible,
    AccessDenied,
    Base,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrafficNode {
    Visible(VisibleTrafficNode),
    Invisible(InvisibleTrafficNode),
    AccessDenied(AccessDeniedTrafficNode),
    Unknown(TrafficNodeBase),
}

impl Polymorphic for TrafficNode {
    type Kind = TrafficNodeKind;

    const FAMILY: &'static str = "TrafficNode";
    const SUBTYPES: &'static [(&'static str, TrafficNodeKind)] = &[
        ("VISIBLE", TrafficNodeKind::Visible),
        ("INVISIBLE", TrafficNodeKind::Invisible),
        ("ACCESS_DENIED", TrafficNodeKind::AccessDenied),
    ];
    const BASE: TrafficNodeKind = TrafficNodeKind::Base;

    fn hydrate_kind(kind: TrafficNodeKind, raw: &Value, cx: &mut Hydrator<'_>) -> Result<Self> {
        Ok(match kind {
            TrafficNodeKind::Visible => Self::Visible(cx.hydrate(raw)?),
            TrafficNodeKind::Invisible => Self::Invisible(cx.hydrate(raw)?),
            TrafficNodeKind::AccessDenied => Self::AccessDenied(cx.hydrate(raw)?),
            TrafficNodeKind::Base => Self::Unknown(cx.hydrate(raw)?),
        })
    }

    fn kind(&self) -> TrafficNodeKind {
        match self {
            Self::Visible(_) => TrafficNodeKind::Visible,
            Self::Invisible(_) => TrafficNodeKind::Invisible,
            Self::AccessDenied(_) => TrafficNodeKind::AccessDenied,
            Self::Unknown(_) => TrafficNodeKind::Base,
        }
    }

    fn subtype_name(kind: TrafficNodeKind) -> &'static str {
        match kind {
            TrafficNodeKind::Visible => VisibleTrafficNode::NAME,
            TrafficNodeKind::Invisible => InvisibleTrafficNode::NAME,
            TrafficNodeKind::AccessDenied => AccessDeniedTrafficNode::NAME,
            TrafficNodeKind::Base => TrafficNodeBase::NAME,
        }
    }
}

impl TrafficNode {
    /// Discriminator as received, including unrecognized values
    pub fn node_type(&self) -> Option<&str> {
        let field = match self {
            Self::Visible(node) => &node.type_,
            Self::Invisible(node) => &node.type_,
            Self::AccessDenied(node) => &node.type_,
            Self::Unknown(node) => &node.type_,
        };
        field.get().map(String::as_str)
    }

    pub fn entity_id(&self) -> Option<&str> {
        match self {
            Self::Visible(node) => node.entity_id.get().map(String::as_str),
            Self::AccessDenied(node) => node.entity_id.get().map(String::as_str),
            Self::Invisible(_) | Self::Unknown(_) => None,
        }
    }

    fn plain_map(&self, keys: KeyStyle) -> Map<String, Value> {
        match self {
            Self::Visible(node) => node.plain_map(keys),
            Self::Invisible(node) => node.plain_map(keys),
            Self::AccessDenied(node) => node.plain_map(keys),
            Self::Unknown(node) => node.plain_map(keys),
        }
    }
}

impl FromWire for TrafficNode {
    fn describe() -> TypeDesc {
        TypeDesc::Family {
            name: Self::FAMILY,
            discriminator: Self::DISCRIMINATOR,
        }
    }

    fn from_wire(raw: &Value, cx: &mut Hydrator<'_>) -> Result<Self> {
        hydrate_polymorphic(raw, cx)
    }
}

impl ToPlain for TrafficNode {
    fn to_plain(&self, keys: KeyStyle) -> Value {
        Value::Object(self.plain_map(keys))
    }
}

impl DynModel for TrafficNode {
    fn type_name(&self) -> &'static str {
        Self::subtype_name(self.kind())
    }

    fn to_plain_hash(&self) -> Map<String, Value> {
        self.plain_map(KeyStyle::Local)
    }

    fn to_plain_wire(&self) -> Map<String, Value> {
        self.plain_map(KeyStyle::Wire)
    }
}

crate::wire_model! {
    /// One route reported by a path analysis
    pub struct TrafficRoute {
        route_label: String => "routeLabel",
        nodes: Vec<TrafficNode> => "nodes",
    }
}

crate::wire_model! {
    pub struct PathAnalysisResult {
        id: String => "id",
        is_successful: bool => "isSuccessful",
        routes: Vec<TrafficRoute> => "routes",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::polymorphic::lookup_subtype;
    use crate::model::{hydrate, resolve_subtype, Advisory, Field};
    use serde_json::json;

    #[test]
    fn test_visible_discriminator_resolves_variant() {
        let node: TrafficNode = FromWire::from_wire(
            &json!({"type": "VISIBLE", "entityId": "ocid1.x"}),
            &mut Hydrator::new(&mut Vec::<Advisory>::new()),
        )
        .unwrap();
        assert_eq!(node.kind(), TrafficNodeKind::Visible);
        assert_eq!(node.entity_id(), Some("ocid1.x"));
        let TrafficNode::Visible(visible) = &node else {
            panic!("expected visible node");
        };
        assert_eq!(visible.entity_id, Field::Set("ocid1.x".to_string()));
    }

    #[test]
    fn test_every_table_entry_resolves_to_its_variant() {
        for (value, kind) in TrafficNode::SUBTYPES {
            assert_eq!(resolve_subtype::<TrafficNode>(&json!({"type": value})), *kind);
        }
        assert_eq!(lookup_subtype::<TrafficNode>(None), None);
    }

    #[test]
    fn test_unknown_discriminator_falls_back_to_base() {
        let mut log: Vec<Advisory> = Vec::new();
        let node: TrafficNode = FromWire::from_wire(
            &json!({"type": "TUNNELED", "egressTraffic": {"protocol": 6}}),
            &mut Hydrator::new(&mut log),
        )
        .unwrap();
        assert_eq!(node.kind(), TrafficNodeKind::Base);
        assert_eq!(node.node_type(), Some("TUNNELED"));
        assert_eq!(node.type_name(), "TrafficNodeBase");
        assert_eq!(
            log,
            vec![Advisory::UnresolvedDiscriminator {
                path: String::new(),
                family: "TrafficNode",
                value: Some("TUNNELED".to_string()),
            }]
        );
    }

    #[test]
    fn test_missing_discriminator_falls_back_to_base() {
        assert_eq!(
            resolve_subtype::<TrafficNode>(&json!({"entityId": "x"})),
            TrafficNodeKind::Base
        );
        assert_eq!(
            resolve_subtype::<TrafficNode>(&json!({"type": 7})),
            TrafficNodeKind::Base
        );
        assert_eq!(resolve_subtype::<TrafficNode>(&json!("VISIBLE")), TrafficNodeKind::Base);
    }

    #[test]
    fn test_routes_hydrate_nodes_polymorphically() {
        let result: PathAnalysisResult = hydrate(&json!({
            "id": "pa-1",
            "isSuccessful": true,
            "routes": [{
                "routeLabel": "primary",
                "nodes": [
                    {"type": "VISIBLE", "entityId": "ocid1.vnic.a", "entityType": "VNIC"},
                    {"type": "INVISIBLE", "nextHopRoutingAction": {"action": "FORWARDED"}},
                    {"type": "ACCESS_DENIED", "entityId": "ocid1.subnet.b",
                     "ingressSecurityAction": {"action": "DENIED"}}
                ]
            }]
        }))
        .unwrap();

        let routes = result.routes.get().unwrap();
        let nodes = routes[0].nodes.get().unwrap();
        let kinds: Vec<TrafficNodeKind> = nodes.iter().map(Polymorphic::kind).collect();
        assert_eq!(
            kinds,
            vec![
                TrafficNodeKind::Visible,
                TrafficNodeKind::Invisible,
                TrafficNodeKind::AccessDenied
            ]
        );
        assert_eq!(nodes[2].entity_id(), Some("ocid1.subnet.b"));

        let plain = result.to_hash();
        assert_eq!(
            plain["routes"][0]["nodes"][1]["next_hop_routing_action"],
            json!({"action": "FORWARDED"})
        );
    }

    #[test]
    fn test_discriminator_stays_in_plain_output() {
        let node: TrafficNode = FromWire::from_wire(
            &json!({"type": "INVISIBLE"}),
            &mut Hydrator::new(&mut Vec::<Advisory>::new()),
        )
        .unwrap();
        assert_eq!(node.to_plain(KeyStyle::Wire), json!({"type": "INVISIBLE"}));
    }
}
