//! Network topology
//!
//! The VPC and public subnets the environment is bound to at creation time.

/// A subnet as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetInfo {
    pub id: String,
    pub vpc_id: String,
    pub zone: String,
    pub cidr: String,
    /// Default subnet of the account's default VPC for this zone
    pub default_for_zone: bool,
}

/// A route table as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteTableInfo {
    pub id: String,
    /// Main route table of the VPC (implicitly associated with every subnet)
    pub main: bool,
    /// Gateways targeted by a `0.0.0.0/0` route
    pub default_route_gateways: Vec<String>,
    /// Subnets explicitly associated with this table
    pub subnet_associations: Vec<String>,
}

impl RouteTableInfo {
    pub fn routes_default_to(&self, gateway_id: &str) -> bool {
        self.default_route_gateways.iter().any(|g| g == gateway_id)
    }

    pub fn is_associated_with(&self, subnet_id: &str) -> bool {
        self.subnet_associations.iter().any(|s| s == subnet_id)
    }
}

/// A subnet bound into the topology
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetRef {
    pub id: String,
    pub zone: String,
}

/// Resolved network for the run
///
/// Each field is supplied by the caller or resolved/created once, then reused
/// for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkTopology {
    pub vpc_id: String,
    pub public_subnets: [SubnetRef; 2],
    pub internet_gateway_id: String,
    pub route_table_id: String,
    /// Instance subnets, when the caller supplied both
    pub private_subnets: Option<[String; 2]>,
}

impl NetworkTopology {
    pub fn public_subnet_ids(&self) -> Vec<&str> {
        self.public_subnets.iter().map(|s| s.id.as_str()).collect()
    }

    /// Subnets the instances are placed in
    pub fn instance_subnet_ids(&self) -> Vec<&str> {
        match &self.private_subnets {
            Some(private) => private.iter().map(String::as_str).collect(),
            None => self.public_subnet_ids(),
        }
    }

    /// Instances need a public address only when they sit in public subnets
    pub fn instances_public(&self) -> bool {
        self.private_subnets.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topology(private: Option<[String; 2]>) -> NetworkTopology {
        NetworkTopology {
            vpc_id: "vpc-1".to_string(),
            public_subnets: [
                SubnetRef {
                    id: "subnet-a".to_string(),
                    zone: "eu-west-1a".to_string(),
                },
                SubnetRef {
                    id: "subnet-b".to_string(),
                    zone: "eu-west-1b".to_string(),
                },
            ],
            internet_gateway_id: "igw-1".to_string(),
            route_table_id: "rtb-1".to_string(),
            private_subnets: private,
        }
    }

    #[test]
    fn instances_use_public_subnets_without_private_pair() {
        let t = topology(None);
        assert_eq!(t.instance_subnet_ids(), vec!["subnet-a", "subnet-b"]);
        assert!(t.instances_public());
    }

    #[test]
    fn instances_use_private_subnets_when_supplied() {
        let t = topology(Some(["subnet-p1".to_string(), "subnet-p2".to_string()]));
        assert_eq!(t.instance_subnet_ids(), vec!["subnet-p1", "subnet-p2"]);
        assert!(!t.instances_public());
    }

    #[test]
    fn route_table_queries() {
        let table = RouteTableInfo {
            id: "rtb-1".to_string(),
            main: false,
            default_route_gateways: vec!["igw-1".to_string()],
            subnet_associations: vec!["subnet-a".to_string()],
        };
        assert!(table.routes_default_to("igw-1"));
        assert!(!table.routes_default_to("igw-2"));
        assert!(table.is_associated_with("subnet-a"));
        assert!(!table.is_associated_with("subnet-b"));
    }
}
