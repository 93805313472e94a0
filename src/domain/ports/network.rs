//! Network port: VPCs, subnets, gateways and route tables
//!
//! `tags` arguments are `(key, value)` pairs applied at creation time.

use crate::domain::entities::{RouteTableInfo, SubnetInfo};

use super::ProviderResult;

pub type Tags = [(String, String)];

pub trait NetworkService {
    /// The account's default VPC in the region, if any
    fn default_vpc(&self) -> ProviderResult<Option<String>>;

    /// A VPC carrying the given `Name` tag
    fn find_vpc_by_name(&self, name: &str) -> ProviderResult<Option<String>>;

    fn create_vpc(&self, cidr: &str, tags: &Tags) -> ProviderResult<String>;

    /// Availability zones in the `available` state, sorted by name
    fn available_zones(&self) -> ProviderResult<Vec<String>>;

    fn list_subnets(&self, vpc_id: &str) -> ProviderResult<Vec<SubnetInfo>>;

    fn describe_subnets(&self, subnet_ids: &[String]) -> ProviderResult<Vec<SubnetInfo>>;

    fn create_subnet(
        &self,
        vpc_id: &str,
        cidr: &str,
        zone: &str,
        tags: &Tags,
    ) -> ProviderResult<SubnetInfo>;

    fn enable_public_ip_on_launch(&self, subnet_id: &str) -> ProviderResult<()>;

    fn attached_internet_gateway(&self, vpc_id: &str) -> ProviderResult<Option<String>>;

    fn create_internet_gateway(&self, tags: &Tags) -> ProviderResult<String>;

    fn attach_internet_gateway(&self, gateway_id: &str, vpc_id: &str) -> ProviderResult<()>;

    fn route_tables(&self, vpc_id: &str) -> ProviderResult<Vec<RouteTableInfo>>;

    fn create_route_table(&self, vpc_id: &str, tags: &Tags) -> ProviderResult<String>;

    /// Add `0.0.0.0/0 -> gateway` to the route table
    fn create_default_route(&self, route_table_id: &str, gateway_id: &str) -> ProviderResult<()>;

    fn associate_route_table(&self, route_table_id: &str, subnet_id: &str) -> ProviderResult<()>;
}

impl<T: NetworkService + ?Sized> NetworkService for &T {
    fn default_vpc(&self) -> ProviderResult<Option<String>> {
        (**self).default_vpc()
    }

    fn find_vpc_by_name(&self, name: &str) -> ProviderResult<Option<String>> {
        (**self).find_vpc_by_name(name)
    }

    fn create_vpc(&self, cidr: &str, tags: &Tags) -> ProviderResult<String> {
        (**self).create_vpc(cidr, tags)
    }

    fn available_zones(&self) -> ProviderResult<Vec<String>> {
        (**self).available_zones()
    }

    fn list_subnets(&self, vpc_id: &str) -> ProviderResult<Vec<SubnetInfo>> {
        (**self).list_subnets(vpc_id)
    }

    fn describe_subnets(&self, subnet_ids: &[String]) -> ProviderResult<Vec<SubnetInfo>> {
        (**self).describe_subnets(subnet_ids)
    }

    fn create_subnet(
        &self,
        vpc_id: &str,
        cidr: &str,
        zone: &str,
        tags: &Tags,
    ) -> ProviderResult<SubnetInfo> {
        (**self).create_subnet(vpc_id, cidr, zone, tags)
    }

    fn enable_public_ip_on_launch(&self, subnet_id: &str) -> ProviderResult<()> {
        (**self).enable_public_ip_on_launch(subnet_id)
    }

    fn attached_internet_gateway(&self, vpc_id: &str) -> ProviderResult<Option<String>> {
        (**self).attached_internet_gateway(vpc_id)
    }

    fn create_internet_gateway(&self, tags: &Tags) -> ProviderResult<String> {
        (**self).create_internet_gateway(tags)
    }

    fn attach_internet_gateway(&self, gateway_id: &str, vpc_id: &str) -> ProviderResult<()> {
        (**self).attach_internet_gateway(gateway_id, vpc_id)
    }

    fn route_tables(&self, vpc_id: &str) -> ProviderResult<Vec<RouteTableInfo>> {
        (**self).route_tables(vpc_id)
    }

    fn create_route_table(&self, vpc_id: &str, tags: &Tags) -> ProviderResult<String> {
        (**self).create_route_table(vpc_id, tags)
    }

    fn create_default_route(&self, route_table_id: &str, gateway_id: &str) -> ProviderResult<()> {
        (**self).create_default_route(route_table_id, gateway_id)
    }

    fn associate_route_table(&self, route_table_id: &str, subnet_id: &str) -> ProviderResult<()> {
        (**self).associate_route_table(route_table_id, subnet_id)
    }
}
