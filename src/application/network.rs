//! Network Provisioner
//!
//! Resolves or creates the VPC, two public subnets in distinct zones, an
//! internet gateway and a public route table, in that order. Every resource
//! is looked up before it is created, so a second run against the same
//! account makes no changes.

use crate::application::deploy::NetworkSettings;
use crate::domain::entities::{NetworkTopology, RouteTableInfo, SubnetInfo, SubnetRef};
use crate::domain::ports::{
    DeployEvent, DeployEventSink, NetworkService, ProviderError, ResourceKind,
};
use crate::error::{DeployError, DeployResult};

const SUBNET_NAMES: [&str; 2] = ["public-1", "public-2"];

pub struct NetworkProvisioner<'a, N> {
    network: &'a N,
    region: &'a str,
    events: &'a dyn DeployEventSink,
}

/// VPC plus how it was obtained
struct ResolvedVpc {
    id: String,
    is_default: bool,
}

impl<'a, N: NetworkService> NetworkProvisioner<'a, N> {
    pub fn new(network: &'a N, region: &'a str, events: &'a dyn DeployEventSink) -> Self {
        Self {
            network,
            region,
            events,
        }
    }

    pub fn ensure(&self, settings: &NetworkSettings) -> DeployResult<NetworkTopology> {
        let (vpc_id, public_subnets) = match &settings.public_subnets {
            Some(ids) => self.supplied_subnets(settings.vpc_id.as_deref(), ids)?,
            None => {
                let zones = self.usable_zones()?;
                let vpc = self.resolve_vpc(settings)?;
                let subnets = self.ensure_subnets(&vpc, &zones, settings)?;
                (vpc.id, subnets)
            }
        };

        let internet_gateway_id = self.ensure_internet_gateway(&vpc_id, settings)?;
        let route_table = self.ensure_route_table(&vpc_id, &internet_gateway_id, settings)?;
        self.ensure_associations(&vpc_id, &route_table, &public_subnets)?;

        Ok(NetworkTopology {
            vpc_id,
            public_subnets,
            internet_gateway_id,
            route_table_id: route_table.id,
            private_subnets: settings.private_subnets.clone(),
        })
    }

    /// Caller-supplied subnets are trusted; only their zones are looked up
    fn supplied_subnets(
        &self,
        vpc_id: Option<&str>,
        ids: &[String; 2],
    ) -> DeployResult<(String, [SubnetRef; 2])> {
        let described = self.network.describe_subnets(ids)?;
        let lookup = |id: &str| -> DeployResult<SubnetInfo> {
            described
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .ok_or_else(|| {
                    ProviderError::malformed(
                        "ec2 describe-subnets",
                        format!("subnet {} not reported", id),
                    )
                    .into()
                })
        };
        let first = lookup(&ids[0])?;
        let second = lookup(&ids[1])?;

        let vpc_id = vpc_id.map(str::to_string).unwrap_or_else(|| first.vpc_id.clone());
        for subnet in [&first, &second] {
            if subnet.vpc_id != vpc_id {
                self.warn(format!(
                    "subnet {} belongs to {}, not {}",
                    subnet.id, subnet.vpc_id, vpc_id
                ));
            }
        }
        if first.zone == second.zone {
            self.warn(format!(
                "public subnets {} and {} share zone {}; the load balancer needs two zones",
                first.id, second.id, first.zone
            ));
        }
        for subnet in [&first, &second] {
            self.found(ResourceKind::Subnet, &subnet.id);
        }

        Ok((vpc_id, [subnet_ref(first), subnet_ref(second)]))
    }

    /// Supplied id, else the default VPC, else one we created earlier, else a new one
    fn resolve_vpc(&self, settings: &NetworkSettings) -> DeployResult<ResolvedVpc> {
        if let Some(id) = &settings.vpc_id {
            self.found(ResourceKind::Vpc, id);
            return Ok(ResolvedVpc {
                id: id.clone(),
                is_default: false,
            });
        }

        if let Some(id) = self.network.default_vpc()? {
            self.found(ResourceKind::Vpc, &id);
            return Ok(ResolvedVpc {
                id,
                is_default: true,
            });
        }

        if let Some(id) = self.network.find_vpc_by_name(&settings.tags.name_for("vpc"))? {
            self.found(ResourceKind::Vpc, &id);
            return Ok(ResolvedVpc {
                id,
                is_default: false,
            });
        }

        let id = self
            .network
            .create_vpc(&settings.vpc_cidr, &settings.tags.for_resource("vpc"))?;
        self.created(ResourceKind::Vpc, &id);
        Ok(ResolvedVpc {
            id,
            is_default: false,
        })
    }

    /// Available zones, checked before anything in the VPC is created
    fn usable_zones(&self) -> DeployResult<Vec<String>> {
        let zones = self.network.available_zones()?;
        if zones.len() < 2 {
            return Err(DeployError::InsufficientZones {
                region: self.region.to_string(),
                available: zones.len(),
            });
        }
        Ok(zones)
    }

    fn ensure_subnets(
        &self,
        vpc: &ResolvedVpc,
        zones: &[String],
        settings: &NetworkSettings,
    ) -> DeployResult<[SubnetRef; 2]> {
        let existing = self.network.list_subnets(&vpc.id)?;

        if vpc.is_default {
            if let Some(pair) = default_subnet_pair(&existing, zones) {
                for subnet in &pair {
                    self.found(ResourceKind::Subnet, &subnet.id);
                }
                return Ok(pair);
            }
        }

        let mut slots: [Option<SubnetInfo>; 2] = [
            existing
                .iter()
                .find(|s| s.cidr == settings.subnet_cidrs[0])
                .cloned(),
            existing
                .iter()
                .find(|s| s.cidr == settings.subnet_cidrs[1])
                .cloned(),
        ];

        for slot in 0..2 {
            if let Some(subnet) = &slots[slot] {
                self.found(ResourceKind::Subnet, &subnet.id);
                continue;
            }

            let other_zone = slots[1 - slot].as_ref().map(|s| s.zone.as_str());
            let zone = zones
                .iter()
                .find(|z| Some(z.as_str()) != other_zone)
                .ok_or_else(|| DeployError::InsufficientZones {
                    region: self.region.to_string(),
                    available: zones.len(),
                })?;

            let subnet = self.network.create_subnet(
                &vpc.id,
                &settings.subnet_cidrs[slot],
                zone,
                &settings.tags.for_resource(SUBNET_NAMES[slot]),
            )?;
            self.network.enable_public_ip_on_launch(&subnet.id)?;
            self.created(ResourceKind::Subnet, &subnet.id);
            slots[slot] = Some(subnet);
        }

        match slots {
            [Some(first), Some(second)] => {
                if first.zone == second.zone {
                    self.warn(format!(
                        "existing subnets {} and {} share zone {}",
                        first.id, second.id, first.zone
                    ));
                }
                Ok([subnet_ref(first), subnet_ref(second)])
            }
            _ => Err(ProviderError::malformed("ec2 create-subnet", "subnet slot left empty").into()),
        }
    }

    fn ensure_internet_gateway(
        &self,
        vpc_id: &str,
        settings: &NetworkSettings,
    ) -> DeployResult<String> {
        if let Some(id) = self.network.attached_internet_gateway(vpc_id)? {
            self.found(ResourceKind::InternetGateway, &id);
            return Ok(id);
        }

        let id = self
            .network
            .create_internet_gateway(&settings.tags.for_resource("igw"))?;
        self.network.attach_internet_gateway(&id, vpc_id)?;
        self.created(ResourceKind::InternetGateway, &id);
        Ok(id)
    }

    /// A table already routing `0.0.0.0/0` to the gateway, else a new one
    fn ensure_route_table(
        &self,
        vpc_id: &str,
        gateway_id: &str,
        settings: &NetworkSettings,
    ) -> DeployResult<RouteTableInfo> {
        let tables = self.network.route_tables(vpc_id)?;
        // Prefer an explicit table over the main one when both qualify
        let reusable = tables
            .iter()
            .filter(|t| t.routes_default_to(gateway_id))
            .min_by_key(|t| t.main);
        if let Some(table) = reusable {
            self.found(ResourceKind::RouteTable, &table.id);
            return Ok(table.clone());
        }

        let id = self
            .network
            .create_route_table(vpc_id, &settings.tags.for_resource("public-rt"))?;
        self.created(ResourceKind::RouteTable, &id);
        self.network.create_default_route(&id, gateway_id)?;
        self.created(ResourceKind::Route, &format!("{} 0.0.0.0/0 -> {}", id, gateway_id));

        Ok(RouteTableInfo {
            id,
            main: false,
            default_route_gateways: vec![gateway_id.to_string()],
            subnet_associations: Vec::new(),
        })
    }

    fn ensure_associations(
        &self,
        vpc_id: &str,
        table: &RouteTableInfo,
        subnets: &[SubnetRef; 2],
    ) -> DeployResult<()> {
        let mut pending = Vec::new();
        for subnet in subnets {
            if table.is_associated_with(&subnet.id) {
                self.found(ResourceKind::RouteTableAssociation, &subnet.id);
            } else {
                pending.push(subnet);
            }
        }
        if pending.is_empty() {
            return Ok(());
        }

        let tables = self.network.route_tables(vpc_id)?;
        for subnet in pending {
            // Explicit associations elsewhere are never replaced
            if let Some(other) = tables
                .iter()
                .find(|t| t.id != table.id && t.is_associated_with(&subnet.id))
            {
                self.warn(format!(
                    "subnet {} is associated with route table {}; leaving it unchanged",
                    subnet.id, other.id
                ));
                continue;
            }

            if table.main {
                // Unassociated subnets already follow the main table
                continue;
            }

            self.network.associate_route_table(&table.id, &subnet.id)?;
            self.created(
                ResourceKind::RouteTableAssociation,
                &format!("{} -> {}", subnet.id, table.id),
            );
        }
        Ok(())
    }

    fn found(&self, kind: ResourceKind, id: &str) {
        if self.events.wants_detailed_events() {
            self.events.on_event(DeployEvent::ResourceFound {
                kind,
                id: id.to_string(),
            });
        }
    }

    fn created(&self, kind: ResourceKind, id: &str) {
        self.events.on_event(DeployEvent::ResourceCreated {
            kind,
            id: id.to_string(),
        });
    }

    fn warn(&self, message: String) {
        self.events.on_event(DeployEvent::Warning { message });
    }
}

fn subnet_ref(subnet: SubnetInfo) -> SubnetRef {
    SubnetRef {
        id: subnet.id,
        zone: subnet.zone,
    }
}

/// First two default-for-zone subnets in distinct available zones
fn default_subnet_pair(existing: &[SubnetInfo], zones: &[String]) -> Option<[SubnetRef; 2]> {
    let mut picked: Vec<&SubnetInfo> = Vec::new();
    for zone in zones {
        if let Some(subnet) = existing
            .iter()
            .find(|s| s.default_for_zone && &s.zone == zone)
        {
            picked.push(subnet);
        }
        if picked.len() == 2 {
            return Some([
                subnet_ref(picked[0].clone()),
                subnet_ref(picked[1].clone()),
            ]);
        }
    }
    None
}
