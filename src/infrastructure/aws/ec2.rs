//! EC2 adapter
//!
//! Response shapes are deserialized into small private structs and mapped to
//! the domain's `SubnetInfo` / `RouteTableInfo`.

use serde::Deserialize;

use super::cli::AwsCli;
use crate::domain::entities::{RouteTableInfo, SubnetInfo};
use crate::domain::ports::{NetworkService, ProviderResult, Tags};

const DEFAULT_ROUTE: &str = "0.0.0.0/0";

/// Network port over `aws ec2`
pub struct Ec2Cli {
    cli: AwsCli,
}

impl Ec2Cli {
    pub fn new(cli: AwsCli) -> Self {
        Self { cli }
    }

    fn first_vpc(&self, filter: &str) -> ProviderResult<Option<String>> {
        let response: DescribeVpcs =
            self.cli
                .json("ec2", "describe-vpcs", &["--filters", filter])?;
        Ok(response.vpcs.into_iter().next().map(|v| v.vpc_id))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeVpcs {
    #[serde(default)]
    vpcs: Vec<Vpc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateVpc {
    vpc: Vpc,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Vpc {
    vpc_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeAvailabilityZones {
    #[serde(default)]
    availability_zones: Vec<AvailabilityZone>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AvailabilityZone {
    zone_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeSubnets {
    #[serde(default)]
    subnets: Vec<Subnet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateSubnet {
    subnet: Subnet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Subnet {
    subnet_id: String,
    vpc_id: String,
    availability_zone: String,
    cidr_block: String,
    #[serde(default)]
    default_for_az: bool,
}

impl From<Subnet> for SubnetInfo {
    fn from(s: Subnet) -> Self {
        Self {
            id: s.subnet_id,
            vpc_id: s.vpc_id,
            zone: s.availability_zone,
            cidr: s.cidr_block,
            default_for_zone: s.default_for_az,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeInternetGateways {
    #[serde(default)]
    internet_gateways: Vec<InternetGateway>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateInternetGateway {
    internet_gateway: InternetGateway,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InternetGateway {
    internet_gateway_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeRouteTables {
    #[serde(default)]
    route_tables: Vec<RouteTable>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateRouteTable {
    route_table: RouteTable,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RouteTable {
    route_table_id: String,
    #[serde(default)]
    associations: Vec<Association>,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Association {
    #[serde(default)]
    main: bool,
    subnet_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Route {
    destination_cidr_block: Option<String>,
    gateway_id: Option<String>,
}

impl From<RouteTable> for RouteTableInfo {
    fn from(t: RouteTable) -> Self {
        Self {
            id: t.route_table_id,
            main: t.associations.iter().any(|a| a.main),
            default_route_gateways: t
                .routes
                .into_iter()
                .filter(|r| r.destination_cidr_block.as_deref() == Some(DEFAULT_ROUTE))
                .filter_map(|r| r.gateway_id)
                .collect(),
            subnet_associations: t
                .associations
                .into_iter()
                .filter_map(|a| a.subnet_id)
                .collect(),
        }
    }
}

/// `--tag-specifications` document for one resource
fn tag_specifications(resource_type: &str, tags: &Tags) -> String {
    let tags: Vec<serde_json::Value> = tags
        .iter()
        .map(|(k, v)| serde_json::json!({ "Key": k, "Value": v }))
        .collect();
    serde_json::json!([{ "ResourceType": resource_type, "Tags": tags }]).to_string()
}

impl NetworkService for Ec2Cli {
    fn default_vpc(&self) -> ProviderResult<Option<String>> {
        self.first_vpc("Name=is-default,Values=true")
    }

    fn find_vpc_by_name(&self, name: &str) -> ProviderResult<Option<String>> {
        self.first_vpc(&format!("Name=tag:Name,Values={}", name))
    }

    fn create_vpc(&self, cidr: &str, tags: &Tags) -> ProviderResult<String> {
        let spec = tag_specifications("vpc", tags);
        let response: CreateVpc = self.cli.json(
            "ec2",
            "create-vpc",
            &["--cidr-block", cidr, "--tag-specifications", spec.as_str()],
        )?;
        let vpc_id = response.vpc.vpc_id;

        // Load balancers and instances need resolvable public DNS names
        self.cli.exec(
            "ec2",
            "modify-vpc-attribute",
            &["--vpc-id", vpc_id.as_str(), "--enable-dns-hostnames"],
        )?;
        Ok(vpc_id)
    }

    fn available_zones(&self) -> ProviderResult<Vec<String>> {
        let response: DescribeAvailabilityZones = self.cli.json(
            "ec2",
            "describe-availability-zones",
            &["--filters", "Name=state,Values=available"],
        )?;
        Ok(response
            .availability_zones
            .into_iter()
            .map(|z| z.zone_name)
            .collect())
    }

    fn list_subnets(&self, vpc_id: &str) -> ProviderResult<Vec<SubnetInfo>> {
        let filter = format!("Name=vpc-id,Values={}", vpc_id);
        let response: DescribeSubnets =
            self.cli
                .json("ec2", "describe-subnets", &["--filters", filter.as_str()])?;
        Ok(response.subnets.into_iter().map(SubnetInfo::from).collect())
    }

    fn describe_subnets(&self, subnet_ids: &[String]) -> ProviderResult<Vec<SubnetInfo>> {
        let mut args = vec!["--subnet-ids"];
        args.extend(subnet_ids.iter().map(String::as_str));
        let response: DescribeSubnets = self.cli.json("ec2", "describe-subnets", &args)?;
        Ok(response.subnets.into_iter().map(SubnetInfo::from).collect())
    }

    fn create_subnet(
        &self,
        vpc_id: &str,
        cidr: &str,
        zone: &str,
        tags: &Tags,
    ) -> ProviderResult<SubnetInfo> {
        let spec = tag_specifications("subnet", tags);
        let response: CreateSubnet = self.cli.json(
            "ec2",
            "create-subnet",
            &[
                "--vpc-id",
                vpc_id,
                "--cidr-block",
                cidr,
                "--availability-zone",
                zone,
                "--tag-specifications",
                spec.as_str(),
            ],
        )?;
        Ok(response.subnet.into())
    }

    fn enable_public_ip_on_launch(&self, subnet_id: &str) -> ProviderResult<()> {
        self.cli.exec(
            "ec2",
            "modify-subnet-attribute",
            &["--subnet-id", subnet_id, "--map-public-ip-on-launch"],
        )
    }

    fn attached_internet_gateway(&self, vpc_id: &str) -> ProviderResult<Option<String>> {
        let filter = format!("Name=attachment.vpc-id,Values={}", vpc_id);
        let response: DescribeInternetGateways = self.cli.json(
            "ec2",
            "describe-internet-gateways",
            &["--filters", filter.as_str()],
        )?;
        Ok(response
            .internet_gateways
            .into_iter()
            .next()
            .map(|g| g.internet_gateway_id))
    }

    fn create_internet_gateway(&self, tags: &Tags) -> ProviderResult<String> {
        let spec = tag_specifications("internet-gateway", tags);
        let response: CreateInternetGateway = self.cli.json(
            "ec2",
            "create-internet-gateway",
            &["--tag-specifications", spec.as_str()],
        )?;
        Ok(response.internet_gateway.internet_gateway_id)
    }

    fn attach_internet_gateway(&self, gateway_id: &str, vpc_id: &str) -> ProviderResult<()> {
        self.cli.exec(
            "ec2",
            "attach-internet-gateway",
            &["--internet-gateway-id", gateway_id, "--vpc-id", vpc_id],
        )
    }

    fn route_tables(&self, vpc_id: &str) -> ProviderResult<Vec<RouteTableInfo>> {
        let filter = format!("Name=vpc-id,Values={}", vpc_id);
        let response: DescribeRouteTables = self.cli.json(
            "ec2",
            "describe-route-tables",
            &["--filters", filter.as_str()],
        )?;
        Ok(response
            .route_tables
            .into_iter()
            .map(RouteTableInfo::from)
            .collect())
    }

    fn create_route_table(&self, vpc_id: &str, tags: &Tags) -> ProviderResult<String> {
        let spec = tag_specifications("route-table", tags);
        let response: CreateRouteTable = self.cli.json(
            "ec2",
            "create-route-table",
            &["--vpc-id", vpc_id, "--tag-specifications", spec.as_str()],
        )?;
        Ok(response.route_table.route_table_id)
    }

    fn create_default_route(&self, route_table_id: &str, gateway_id: &str) -> ProviderResult<()> {
        self.cli.exec(
            "ec2",
            "create-route",
            &[
                "--route-table-id",
                route_table_id,
                "--destination-cidr-block",
                DEFAULT_ROUTE,
                "--gateway-id",
                gateway_id,
            ],
        )
    }

    fn associate_route_table(&self, route_table_id: &str, subnet_id: &str) -> ProviderResult<()> {
        self.cli.exec(
            "ec2",
            "associate-route-table",
            &["--route-table-id", route_table_id, "--subnet-id", subnet_id],
        )
    }
}
