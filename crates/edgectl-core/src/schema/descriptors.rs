// Static descriptors, one per editable resource. Property keys are the
// wire names so a serialized model validates as-is.

use edgectl_api::OrchestrationMode;
use serde_json::{Value, json};
use strum::{Display, EnumIter, EnumString};

use super::FormDescriptor;

/// Every descriptor the console knows, addressable by name from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum SchemaKind {
    Node,
    NodeAdd,
    App,
    Interface,
    InterfacePolicy,
    AppPolicy,
    DnsConfigApply,
    TrafficPolicy,
    KubeOvnPolicy,
    Userplane,
    Subscription,
    PfdTransaction,
    PfdApplication,
}

pub fn descriptor_for(kind: SchemaKind) -> FormDescriptor {
    match kind {
        SchemaKind::Node => node(),
        SchemaKind::NodeAdd => node_add(),
        SchemaKind::App => app(),
        SchemaKind::Interface => interface(),
        SchemaKind::InterfacePolicy => interface_policy(),
        SchemaKind::AppPolicy => app_policy(),
        SchemaKind::DnsConfigApply => dns_config_apply(),
        SchemaKind::TrafficPolicy => traffic_policy(),
        SchemaKind::KubeOvnPolicy => kube_ovn_policy(),
        SchemaKind::Userplane => userplane(),
        SchemaKind::Subscription => subscription(),
        SchemaKind::PfdTransaction => pfd_transaction(),
        SchemaKind::PfdApplication => pfd_application(),
    }
}

/// Policy descriptor matching the document shape `mode` uses.
pub fn policy_for(mode: OrchestrationMode) -> FormDescriptor {
    if mode.uses_kube_ovn_policies() {
        kube_ovn_policy()
    } else {
        traffic_policy()
    }
}

fn star(schema: Value) -> FormDescriptor {
    FormDescriptor::new(schema, json!(["*"]))
}

fn read_only_id() -> Value {
    json!({ "title": "ID", "type": "string", "readOnly": true })
}

fn port(min: u16) -> Value {
    json!({ "title": "Port", "type": "number", "minimum": min, "maximum": 65535 })
}

// ── Node controller ──

pub fn node() -> FormDescriptor {
    star(json!({
        "type": "object",
        "title": "Node",
        "required": ["name", "serial", "location"],
        "properties": {
            "id": read_only_id(),
            "name": { "title": "Name", "type": "string" },
            "location": { "title": "Location", "type": "string" },
            "serial": { "title": "Serial", "type": "string" }
        }
    }))
}

/// The add-node dialog on the nodes list. The controller assigns the id.
pub fn node_add() -> FormDescriptor {
    star(json!({
        "type": "object",
        "title": "Add Edge Node",
        "required": ["name", "serial", "location"],
        "properties": {
            "name": { "title": "Name", "type": "string" },
            "location": { "title": "Location", "type": "string" },
            "serial": { "title": "Serial", "type": "string" }
        }
    }))
}

pub fn app() -> FormDescriptor {
    star(json!({
        "type": "object",
        "title": "App",
        "required": ["type", "name", "version", "vendor", "cores", "memory", "source"],
        "properties": {
            "id": read_only_id(),
            "type": { "title": "Type", "type": "string", "enum": ["container", "vm"] },
            "name": { "title": "Name", "type": "string" },
            "version": { "title": "Version", "type": "string" },
            "vendor": { "title": "Vendor", "type": "string" },
            "description": { "title": "Description", "type": "string" },
            "cores": { "title": "Cores", "type": "number", "minimum": 1, "maximum": 8 },
            "memory": {
                "title": "Memory (in MB)",
                "type": "number",
                "minimum": 1,
                "maximum": 16384
            },
            "ports": {
                "title": "Ports",
                "type": "array",
                "items": {
                    "title": "Port",
                    "type": "object",
                    "properties": {
                        "port": port(1),
                        "protocol": {
                            "title": "Protocol",
                            "type": "string",
                            "enum": ["tcp", "udp", "icmp", "sctp", "all"]
                        }
                    }
                }
            },
            "source": { "title": "Source", "type": "string" },
            "epafeatures": {
                "title": "EPA Features",
                "type": "array",
                "items": {
                    "title": "EPA Feature",
                    "type": "object",
                    "required": ["key"],
                    "properties": {
                        "key": { "title": "EPA Feature Key", "type": "string" },
                        "value": { "title": "EPA Feature Value", "type": "string" }
                    }
                }
            }
        }
    }))
}

pub fn interface() -> FormDescriptor {
    star(json!({
        "type": "object",
        "title": "Node Interface",
        "properties": {
            "id": read_only_id(),
            "description": { "title": "Description", "type": "string" },
            "driver": { "title": "Driver", "type": "string", "enum": ["kernel", "userspace"] },
            "type": {
                "title": "Type",
                "type": "string",
                "enum": ["none", "upstream", "downstream", "bidirectional", "breakout"]
            },
            "mac_address": { "title": "Mac Address", "type": "string", "readOnly": true },
            "vlan": { "title": "Vlan", "type": "number", "readOnly": true },
            "zones": {
                "title": "Zones",
                "type": "array",
                "items": { "title": "Private Traffic", "type": "string" }
            },
            "fallback_interface": { "title": "Fallback Interface", "type": "string" }
        }
    }))
}

pub fn interface_policy() -> FormDescriptor {
    star(json!({
        "type": "object",
        "title": "Node Interface Policy",
        "properties": { "id": read_only_id() }
    }))
}

pub fn app_policy() -> FormDescriptor {
    star(json!({
        "type": "object",
        "title": "Node App Policy",
        "properties": { "id": read_only_id() }
    }))
}

pub fn dns_config_apply() -> FormDescriptor {
    star(json!({
        "type": "object",
        "title": "DNS Config",
        "required": ["name"],
        "properties": {
            "name": { "title": "Name", "type": "string" },
            "records": {
                "title": "Records",
                "type": "object",
                "properties": {
                    "a": {
                        "title": "A Records",
                        "type": "array",
                        "items": {
                            "title": "A Record",
                            "type": "object",
                            "required": ["name"],
                            "properties": {
                                "name": { "title": "Name", "type": "string" },
                                "description": { "title": "Description", "type": "string" },
                                "alias": { "title": "Alias", "type": "boolean" },
                                "values": {
                                    "title": "Values",
                                    "type": "array",
                                    "items": { "type": "string", "format": "ipv4" }
                                }
                            }
                        }
                    }
                }
            },
            "configurations": {
                "title": "Configurations",
                "type": "object",
                "properties": {
                    "forwarders": {
                        "title": "Forwarders",
                        "type": "array",
                        "items": {
                            "title": "Forwarder",
                            "type": "object",
                            "required": ["value"],
                            "properties": {
                                "name": { "title": "Name", "type": "string" },
                                "description": { "title": "Description", "type": "string" },
                                "value": { "title": "Value", "type": "string", "format": "ipv4" }
                            }
                        }
                    }
                }
            }
        }
    }))
}

// ── Traffic policies ──

fn traffic_selector(title: &str) -> Value {
    json!({
        "title": title,
        "type": "object",
        "properties": {
            "description": { "title": "Description", "type": "string" },
            "macs": {
                "title": "MAC Filter",
                "type": "object",
                "properties": {
                    "mac_addresses": {
                        "title": "MAC Addresses",
                        "type": "array",
                        "items": { "title": "MAC Address", "type": "string", "format": "mac-address" }
                    }
                }
            },
            "ip": {
                "title": "IP Filter",
                "type": "object",
                "properties": {
                    "address": { "title": "Address", "type": "string" },
                    "mask": { "title": "Mask", "type": "number", "minimum": 0, "maximum": 128 },
                    "begin_port": port(0),
                    "end_port": port(0),
                    "protocol": {
                        "title": "Protocol",
                        "type": "string",
                        "enum": ["all", "tcp", "udp", "icmp", "sctp"]
                    }
                }
            },
            "gtp": {
                "title": "GTP Filter",
                "type": "object",
                "properties": {
                    "address": { "title": "Address", "type": "string" },
                    "mask": { "title": "Mask", "type": "number", "minimum": 0, "maximum": 128 },
                    "imsis": {
                        "title": "IMSIs",
                        "type": "array",
                        "items": { "title": "IMSI", "type": "string", "minLength": 14, "maxLength": 15 }
                    }
                }
            }
        }
    })
}

pub fn traffic_policy() -> FormDescriptor {
    star(json!({
        "type": "object",
        "title": "Traffic Policy",
        "required": ["name", "traffic_rules"],
        "properties": {
            "id": read_only_id(),
            "name": { "title": "Name", "type": "string" },
            "traffic_rules": {
                "title": "Traffic Rules",
                "type": "array",
                "items": {
                    "title": "Traffic Rule",
                    "type": "object",
                    "required": ["priority"],
                    "properties": {
                        "description": { "title": "Description", "type": "string" },
                        "priority": {
                            "title": "Priority",
                            "type": "number",
                            "minimum": 1,
                            "maximum": 65535
                        },
                        "source": traffic_selector("Source"),
                        "destination": traffic_selector("Destination"),
                        "target": {
                            "title": "Target",
                            "type": "object",
                            "properties": {
                                "description": { "title": "Description", "type": "string" },
                                "action": {
                                    "title": "Action",
                                    "type": "string",
                                    "enum": ["accept", "reject", "drop"]
                                },
                                "mac": {
                                    "title": "MAC Modifier",
                                    "type": "object",
                                    "properties": {
                                        "mac_address": {
                                            "title": "MAC Address",
                                            "type": "string",
                                            "format": "mac-address"
                                        }
                                    }
                                },
                                "ip": {
                                    "title": "IP Modifier",
                                    "type": "object",
                                    "properties": {
                                        "address": { "title": "IP Address", "type": "string" },
                                        "port": port(0)
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }))
}

fn ip_blocks(title: &str) -> Value {
    json!({
        "title": title,
        "type": "array",
        "items": {
            "title": "IP Block",
            "type": "object",
            "required": ["cidr"],
            "properties": {
                "cidr": { "title": "CIDR", "type": "string", "format": "cidr" },
                "except": {
                    "title": "Excepts",
                    "type": "array",
                    "items": { "type": "string", "format": "cidr" }
                }
            }
        }
    })
}

fn kube_ports() -> Value {
    json!({
        "title": "Ports",
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "port": { "title": "Port number", "type": "number", "minimum": 0, "maximum": 65535 },
                "protocol": { "title": "Protocol", "type": "string", "enum": ["tcp", "udp", "sctp"] }
            },
            "dependencies": {
                "port": ["protocol"],
                "protocol": ["port"]
            }
        }
    })
}

pub fn kube_ovn_policy() -> FormDescriptor {
    star(json!({
        "type": "object",
        "title": "Traffic Policy",
        "required": ["name"],
        "properties": {
            "id": read_only_id(),
            "name": { "title": "Name", "type": "string" },
            "ingress_rules": {
                "title": "Ingress Rules",
                "type": "array",
                "items": {
                    "title": "New Ingress Rule",
                    "type": "object",
                    "properties": {
                        "description": { "title": "Description", "type": "string" },
                        "from": ip_blocks("From"),
                        "ports": kube_ports()
                    }
                }
            },
            "egress_rules": {
                "title": "Egress Rules",
                "type": "array",
                "items": {
                    "title": "New Egress Rule",
                    "type": "object",
                    "properties": {
                        "description": { "title": "Description", "type": "string" },
                        "to": ip_blocks("To"),
                        "ports": kube_ports()
                    }
                }
            }
        }
    }))
}

// ── CUPS ──

fn up_endpoint(title: &str) -> Value {
    json!({
        "title": title,
        "type": "object",
        "properties": {
            "up_ip_address": { "title": "UP IP Address", "type": "string", "format": "ipv4" }
        }
    })
}

fn cp_up_endpoint(title: &str) -> Value {
    json!({
        "title": title,
        "type": "object",
        "properties": {
            "cp_ip_address": { "title": "CP IP Address", "type": "string", "format": "ipv4" },
            "up_ip_address": { "title": "UP IP Address", "type": "string", "format": "ipv4" }
        }
    })
}

pub fn userplane() -> FormDescriptor {
    star(json!({
        "type": "object",
        "title": "Userplane",
        "required": ["uuid", "function"],
        "properties": {
            "id": read_only_id(),
            "uuid": { "title": "UUID", "type": "string" },
            "function": {
                "title": "Function",
                "type": "string",
                "enum": ["NONE", "SGWU", "PGWU", "SAEGWU"]
            },
            "config": {
                "title": "Config",
                "type": "object",
                "properties": {
                    "sxa": cp_up_endpoint("Sxa"),
                    "sxb": cp_up_endpoint("Sxb"),
                    "s1u": up_endpoint("S1-U"),
                    "s5u_sgw": up_endpoint("S5-U SGW"),
                    "s5u_pgw": up_endpoint("S5-U PGW"),
                    "sgi": up_endpoint("SGi"),
                    "breakout": { "title": "Breakout", "type": "array", "items": up_endpoint("Breakout") },
                    "dns": { "title": "DNS", "type": "array", "items": up_endpoint("DNS") }
                }
            },
            "selectors": {
                "title": "Selectors",
                "type": "array",
                "items": {
                    "title": "Selector",
                    "type": "object",
                    "properties": {
                        "id": { "title": "ID", "type": "string" },
                        "network": {
                            "title": "Network",
                            "type": "object",
                            "required": ["mcc", "mnc"],
                            "properties": {
                                "mcc": { "title": "MCC", "type": "string", "minLength": 3, "maxLength": 3 },
                                "mnc": { "title": "MNC", "type": "string", "minLength": 2, "maxLength": 3 }
                            }
                        },
                        "uli": {
                            "title": "ULI",
                            "type": "object",
                            "properties": {
                                "tai": {
                                    "title": "TAI",
                                    "type": "object",
                                    "properties": { "tac": { "title": "TAC", "type": "number", "minimum": 0 } }
                                },
                                "ecgi": {
                                    "title": "ECGI",
                                    "type": "object",
                                    "properties": { "eci": { "title": "ECI", "type": "number", "minimum": 0 } }
                                }
                            }
                        },
                        "pdn": {
                            "title": "PDN",
                            "type": "object",
                            "properties": {
                                "apns": { "title": "APNs", "type": "array", "items": { "type": "string" } }
                            }
                        }
                    }
                }
            },
            "entitlements": {
                "title": "Entitlements",
                "type": "array",
                "items": {
                    "title": "Entitlement",
                    "type": "object",
                    "properties": {
                        "id": { "title": "ID", "type": "string" },
                        "apns": { "title": "APNs", "type": "array", "items": { "type": "string" } },
                        "imsis": {
                            "title": "IMSI ranges",
                            "type": "array",
                            "items": {
                                "type": "object",
                                "required": ["begin", "end"],
                                "properties": {
                                    "begin": { "title": "Begin", "type": "string", "minLength": 14, "maxLength": 15 },
                                    "end": { "title": "End", "type": "string", "minLength": 14, "maxLength": 15 }
                                }
                            }
                        }
                    }
                }
            }
        }
    }))
}

// ── CNCA ──

pub fn subscription() -> FormDescriptor {
    let schema = json!({
        "type": "object",
        "title": "Traffic Influence Subscription",
        "properties": {
            "afServiceId": { "title": "AF Service ID", "type": "string" },
            "afAppId": { "title": "AF Application ID", "type": "string" },
            "afTransId": { "title": "AF Transaction ID", "type": "string" },
            "appReloInd": { "title": "Application Relocation", "type": "boolean" },
            "dnn": { "title": "DNN", "type": "string" },
            "snssai": {
                "title": "S-NSSAI",
                "type": "object",
                "required": ["sst"],
                "properties": {
                    "sst": { "title": "SST", "type": "number", "minimum": 0, "maximum": 255 },
                    "sd": { "title": "SD", "type": "string", "minLength": 6, "maxLength": 6 }
                }
            },
            "externalGroupId": { "title": "External Group ID", "type": "string" },
            "anyUeInd": { "title": "Any UE", "type": "boolean" },
            "gpsi": { "title": "GPSI", "type": "string" },
            "ipv4Addr": { "title": "IPv4 Address", "type": "string", "format": "ipv4" },
            "ipv6Addr": { "title": "IPv6 Address", "type": "string" },
            "macAddr": { "title": "MAC Address", "type": "string", "format": "mac-address" },
            "dnaiChgType": {
                "title": "DNAI Change Type",
                "type": "string",
                "enum": ["EARLY", "EARLY_LATE", "LATE"]
            },
            "notificationDestination": { "title": "Notification Destination", "type": "string" },
            "trafficFilters": {
                "title": "Traffic Filters",
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["flowId"],
                    "properties": {
                        "flowId": { "title": "Flow ID", "type": "number", "minimum": 0 },
                        "flowDescriptions": {
                            "title": "Flow Descriptions",
                            "type": "array",
                            "items": { "type": "string" }
                        }
                    }
                }
            },
            "ethTrafficFilters": {
                "title": "Ethernet Traffic Filters",
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "destMacAddr": { "title": "Destination MAC Address", "type": "string", "format": "mac-address" },
                        "ethType": { "title": "Ethernet Type", "type": "string" },
                        "fDesc": { "title": "Flow Description", "type": "string" },
                        "fDir": {
                            "title": "Flow Direction",
                            "type": "string",
                            "enum": ["DOWNLINK", "UPLINK", "BIDIRECTIONAL", "UNSPECIFIED"]
                        },
                        "sourceMacAddr": { "title": "Source MAC Address", "type": "string", "format": "mac-address" },
                        "vlanTags": { "title": "VLAN Tags", "type": "array", "items": { "type": "string" } }
                    }
                }
            },
            "trafficRoutes": {
                "title": "Traffic Routes",
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["dnai"],
                    "properties": {
                        "dnai": { "title": "DNAI", "type": "string" },
                        "routeInfo": {
                            "title": "Route Information",
                            "type": "object",
                            "properties": {
                                "ipv4Addr": { "title": "IPv4 Address", "type": "string", "format": "ipv4" },
                                "ipv6Addr": { "title": "IPv6 Address", "type": "string" },
                                "portNumber": port(0)
                            }
                        },
                        "routeProfId": { "title": "Route Profile ID", "type": "string" }
                    }
                }
            },
            "tempValidities": {
                "title": "Temporal Validities",
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "startTime": { "title": "Start Time", "type": "string" },
                        "stopTime": { "title": "Stop Time", "type": "string" }
                    }
                }
            },
            "validGeoZoneIds": {
                "title": "Valid Geo Zone IDs",
                "type": "array",
                "items": { "type": "string" }
            },
            "self": { "title": "Self", "type": "string", "readOnly": true }
        }
    });

    let form = json!([
        "afServiceId",
        "afAppId",
        "afTransId",
        "appReloInd",
        "dnn",
        "snssai",
        "externalGroupId",
        "anyUeInd",
        "gpsi",
        "ipv4Addr",
        "ipv6Addr",
        "macAddr",
        "dnaiChgType",
        "notificationDestination",
        {
            "key": "trafficFilters",
            "items": [
                { "key": "trafficFilters[].flowId", "title": "Flow ID" },
                { "key": "trafficFilters[].flowDescriptions", "title": "Flow Descriptions" }
            ]
        },
        { "key": "ethTrafficFilters" },
        { "key": "trafficRoutes" },
        "tempValidities",
        "validGeoZoneIds",
        "self"
    ]);

    FormDescriptor::new(schema, form)
}

fn pfd_data_schema() -> Value {
    json!({
        "title": "AF Application",
        "type": "object",
        "required": ["externalAppID"],
        "properties": {
            "externalAppID": { "title": "AF application ID", "type": "string" },
            "self": { "title": "Self", "type": "string", "readOnly": true },
            "allowedDelay": { "title": "Allowed delay (in seconds)", "type": "number", "minimum": 0 },
            "cachingTime": { "title": "Caching time (in seconds)", "type": "number", "minimum": 0 },
            "pfds": {
                "title": "PFDs",
                "type": "array",
                "minItems": 1,
                "maxItems": 10,
                "items": {
                    "type": "object",
                    "required": ["pfdID"],
                    "properties": {
                        "pfdID": { "title": "PFD ID", "type": "string" },
                        "flowDescriptions": { "title": "Flow Descriptions", "type": "array", "items": { "type": "string" } },
                        "urls": { "title": "URLs", "type": "array", "items": { "type": "string" } },
                        "domainNames": { "title": "Domain Names", "type": "array", "items": { "type": "string" } }
                    }
                }
            }
        }
    })
}

pub fn pfd_transaction() -> FormDescriptor {
    star(json!({
        "type": "object",
        "title": "Packet Flow Descriptor",
        "required": ["pfdDatas"],
        "properties": {
            "self": { "title": "Self", "type": "string", "readOnly": true },
            "suppFeat": { "title": "Supported Features", "type": "string" },
            "pfdDatas": {
                "title": "PFD Transactions",
                "type": "array",
                "minItems": 1,
                "items": pfd_data_schema()
            }
        }
    }))
}

pub fn pfd_application() -> FormDescriptor {
    star(pfd_data_schema())
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_kind_has_an_object_schema_with_a_title() {
        for kind in SchemaKind::iter() {
            let d = descriptor_for(kind);
            assert_eq!(d.schema["type"], "object", "{kind}");
            assert!(!d.title().is_empty(), "{kind}");
            assert!(!d.fields().is_empty(), "{kind}");
        }
    }

    #[test]
    fn kinds_parse_from_kebab_case() {
        assert_eq!("kube-ovn-policy".parse::<SchemaKind>().ok(), Some(SchemaKind::KubeOvnPolicy));
        assert_eq!(SchemaKind::DnsConfigApply.to_string(), "dns-config-apply");
    }

    #[test]
    fn policy_descriptor_follows_mode() {
        assert_eq!(policy_for(OrchestrationMode::Native), traffic_policy());
        assert_eq!(policy_for(OrchestrationMode::KubernetesOvn), kube_ovn_policy());
    }
}
