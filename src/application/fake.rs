//! In-memory provider used by the application tests
//!
//! `FakeCloud` implements every provider port over a single mutable state,
//! logs each call as `"<operation> <args>"`, and can be told to fail a given
//! operation.

use std::cell::{Ref, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::entities::{
    EnvironmentEvent, EnvironmentHealth, EnvironmentStatus, OptionSettings, RouteTableInfo,
    SubnetInfo, TrustPolicy,
};
use crate::domain::ports::{
    ArtifactStorage, Clock, CreateEnvironment, DeployEvent, DeployEventSink, EnvironmentService,
    IdentityService, NetworkService, ProviderError, ProviderResult, Tags, UpdateEnvironment,
};
use crate::domain::value_objects::{ArtifactLocation, BucketLocation, VersionLabel};

/// Operations that only observe state
const READS: &[&str] = &[
    "role_exists",
    "instance_profile_roles",
    "bucket_exists",
    "default_vpc",
    "find_vpc_by_name",
    "available_zones",
    "list_subnets",
    "describe_subnets",
    "attached_internet_gateway",
    "route_tables",
    "application_exists",
    "environment_status",
    "environment_health",
    "environment_vpc",
    "recent_events",
];

#[derive(Debug, Clone, Default)]
pub struct FakeRole {
    pub trusted: String,
    pub policies: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FakeVpc {
    pub id: String,
    pub cidr: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FakeEnvironment {
    pub status: EnvironmentStatus,
    pub health: EnvironmentHealth,
    pub vpc: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FakeVersion {
    pub application: String,
    pub label: String,
    pub source: String,
    pub description: String,
}

/// A create or update call as received
#[derive(Debug, Clone)]
pub struct EnvironmentRequest {
    pub version_label: String,
    /// Present only on creation
    pub solution_stack: Option<String>,
    pub options: OptionSettings,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub roles: HashMap<String, FakeRole>,
    pub instance_profiles: HashMap<String, Vec<String>>,
    pub buckets: HashMap<String, BucketLocation>,
    pub objects: HashMap<String, PathBuf>,
    pub applications: HashSet<String>,
    pub versions: Vec<FakeVersion>,
    pub default_vpc: Option<String>,
    pub vpcs: Vec<FakeVpc>,
    pub zones: Vec<String>,
    pub subnets: Vec<SubnetInfo>,
    pub public_ip_subnets: HashSet<String>,
    /// Gateway id -> attached VPC
    pub gateways: HashMap<String, Option<String>>,
    /// (VPC id, table)
    pub route_tables: Vec<(String, RouteTableInfo)>,
    /// Resource id -> tags applied at creation
    pub tags: HashMap<String, Vec<(String, String)>>,
    pub environment: Option<FakeEnvironment>,
    pub env_events: Vec<EnvironmentEvent>,
    pub requests: Vec<EnvironmentRequest>,
    /// Set once a create or update has been issued
    pub deploy_issued: bool,
    /// Status/health observed by successive polls after a deploy was issued
    pub poll_script: VecDeque<(EnvironmentStatus, EnvironmentHealth)>,
    next_id: u32,
}

impl FakeState {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

#[derive(Default)]
pub struct FakeCloud {
    state: RefCell<FakeState>,
    log: RefCell<Vec<String>>,
    failures: RefCell<HashMap<String, ProviderError>>,
}

impl FakeCloud {
    pub fn new() -> Self {
        let cloud = Self::default();
        cloud.with_state(|s| s.zones = vec!["us-east-1a".to_string(), "us-east-1b".to_string()]);
        cloud
    }

    pub fn state(&self) -> Ref<'_, FakeState> {
        self.state.borrow()
    }

    pub fn with_state(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut self.state.borrow_mut());
    }

    /// Make every later call of `operation` fail
    pub fn fail_on(&self, operation: &str, error: ProviderError) {
        self.failures
            .borrow_mut()
            .insert(operation.to_string(), error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Calls that change provider state
    pub fn mutations(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter(|call| {
                let op = call.split(' ').next().unwrap_or_default();
                !READS.contains(&op)
            })
            .cloned()
            .collect()
    }

    pub fn reset_log(&self) {
        self.log.borrow_mut().clear();
    }

    /// Account default VPC with default subnets, an attached gateway and a
    /// main route table routing to it
    pub fn seed_default_vpc(&self, zones: &[&str]) {
        self.with_state(|s| {
            s.zones = zones.iter().map(|z| z.to_string()).collect();
            s.default_vpc = Some("vpc-default".to_string());
            s.vpcs.push(FakeVpc {
                id: "vpc-default".to_string(),
                cidr: "172.31.0.0/16".to_string(),
                name: None,
            });
            for (i, zone) in zones.iter().enumerate() {
                s.subnets.push(SubnetInfo {
                    id: format!("subnet-default-{}", i + 1),
                    vpc_id: "vpc-default".to_string(),
                    zone: zone.to_string(),
                    cidr: format!("172.31.{}.0/20", i * 16),
                    default_for_zone: true,
                });
            }
            s.gateways
                .insert("igw-default".to_string(), Some("vpc-default".to_string()));
            s.route_tables.push((
                "vpc-default".to_string(),
                RouteTableInfo {
                    id: "rtb-default".to_string(),
                    main: true,
                    default_route_gateways: vec!["igw-default".to_string()],
                    subnet_associations: Vec::new(),
                },
            ));
        });
    }

    fn call(&self, operation: &str, args: &[&str]) -> ProviderResult<()> {
        let mut entry = operation.to_string();
        for arg in args {
            entry.push(' ');
            entry.push_str(arg);
        }
        self.log.borrow_mut().push(entry);
        match self.failures.borrow().get(operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn tag(&self, id: &str, tags: &Tags) {
        self.state
            .borrow_mut()
            .tags
            .insert(id.to_string(), tags.to_vec());
    }
}

impl IdentityService for FakeCloud {
    fn role_exists(&self, role: &str) -> ProviderResult<bool> {
        self.call("role_exists", &[role])?;
        Ok(self.state().roles.contains_key(role))
    }

    fn create_role(&self, role: &str, trust: &TrustPolicy) -> ProviderResult<()> {
        self.call("create_role", &[role])?;
        self.state.borrow_mut().roles.insert(
            role.to_string(),
            FakeRole {
                trusted: trust.trusted_service().to_string(),
                policies: Vec::new(),
            },
        );
        Ok(())
    }

    fn attach_role_policy(&self, role: &str, policy_arn: &str) -> ProviderResult<()> {
        self.call("attach_role_policy", &[role, policy_arn])?;
        let mut state = self.state.borrow_mut();
        let entry = state.roles.entry(role.to_string()).or_default();
        if !entry.policies.iter().any(|p| p == policy_arn) {
            entry.policies.push(policy_arn.to_string());
        }
        Ok(())
    }

    fn instance_profile_roles(&self, profile: &str) -> ProviderResult<Option<Vec<String>>> {
        self.call("instance_profile_roles", &[profile])?;
        Ok(self.state().instance_profiles.get(profile).cloned())
    }

    fn create_instance_profile(&self, profile: &str) -> ProviderResult<()> {
        self.call("create_instance_profile", &[profile])?;
        self.state
            .borrow_mut()
            .instance_profiles
            .insert(profile.to_string(), Vec::new());
        Ok(())
    }

    fn add_role_to_instance_profile(&self, profile: &str, role: &str) -> ProviderResult<()> {
        self.call("add_role_to_instance_profile", &[profile, role])?;
        self.state
            .borrow_mut()
            .instance_profiles
            .entry(profile.to_string())
            .or_default()
            .push(role.to_string());
        Ok(())
    }
}

impl ArtifactStorage for FakeCloud {
    fn bucket_exists(&self, bucket: &str) -> ProviderResult<bool> {
        self.call("bucket_exists", &[bucket])?;
        Ok(self.state().buckets.contains_key(bucket))
    }

    fn create_bucket(&self, bucket: &str, location: &BucketLocation) -> ProviderResult<()> {
        self.call("create_bucket", &[bucket])?;
        self.state
            .borrow_mut()
            .buckets
            .insert(bucket.to_string(), location.clone());
        Ok(())
    }

    fn upload(&self, local: &Path, location: &ArtifactLocation) -> ProviderResult<()> {
        let uri = location.uri();
        self.call("upload", &[uri.as_str()])?;
        self.state
            .borrow_mut()
            .objects
            .insert(uri, local.to_path_buf());
        Ok(())
    }
}

impl NetworkService for FakeCloud {
    fn default_vpc(&self) -> ProviderResult<Option<String>> {
        self.call("default_vpc", &[])?;
        Ok(self.state().default_vpc.clone())
    }

    fn find_vpc_by_name(&self, name: &str) -> ProviderResult<Option<String>> {
        self.call("find_vpc_by_name", &[name])?;
        Ok(self
            .state()
            .vpcs
            .iter()
            .find(|v| v.name.as_deref() == Some(name))
            .map(|v| v.id.clone()))
    }

    fn create_vpc(&self, cidr: &str, tags: &Tags) -> ProviderResult<String> {
        self.call("create_vpc", &[cidr])?;
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.id("vpc");
            let main_table = state.id("rtb-main");
            state.vpcs.push(FakeVpc {
                id: id.clone(),
                cidr: cidr.to_string(),
                name: tags
                    .iter()
                    .find(|(k, _)| k == "Name")
                    .map(|(_, v)| v.clone()),
            });
            state.route_tables.push((
                id.clone(),
                RouteTableInfo {
                    id: main_table,
                    main: true,
                    ..RouteTableInfo::default()
                },
            ));
            id
        };
        self.tag(&id, tags);
        Ok(id)
    }

    fn available_zones(&self) -> ProviderResult<Vec<String>> {
        self.call("available_zones", &[])?;
        Ok(self.state().zones.clone())
    }

    fn list_subnets(&self, vpc_id: &str) -> ProviderResult<Vec<SubnetInfo>> {
        self.call("list_subnets", &[vpc_id])?;
        Ok(self
            .state()
            .subnets
            .iter()
            .filter(|s| s.vpc_id == vpc_id)
            .cloned()
            .collect())
    }

    fn describe_subnets(&self, subnet_ids: &[String]) -> ProviderResult<Vec<SubnetInfo>> {
        let joined = subnet_ids.join(",");
        self.call("describe_subnets", &[joined.as_str()])?;
        Ok(self
            .state()
            .subnets
            .iter()
            .filter(|s| subnet_ids.contains(&s.id))
            .cloned()
            .collect())
    }

    fn create_subnet(
        &self,
        vpc_id: &str,
        cidr: &str,
        zone: &str,
        tags: &Tags,
    ) -> ProviderResult<SubnetInfo> {
        self.call("create_subnet", &[vpc_id, cidr, zone])?;
        let subnet = {
            let mut state = self.state.borrow_mut();
            let subnet = SubnetInfo {
                id: state.id("subnet"),
                vpc_id: vpc_id.to_string(),
                zone: zone.to_string(),
                cidr: cidr.to_string(),
                default_for_zone: false,
            };
            state.subnets.push(subnet.clone());
            subnet
        };
        self.tag(&subnet.id, tags);
        Ok(subnet)
    }

    fn enable_public_ip_on_launch(&self, subnet_id: &str) -> ProviderResult<()> {
        self.call("enable_public_ip_on_launch", &[subnet_id])?;
        self.state
            .borrow_mut()
            .public_ip_subnets
            .insert(subnet_id.to_string());
        Ok(())
    }

    fn attached_internet_gateway(&self, vpc_id: &str) -> ProviderResult<Option<String>> {
        self.call("attached_internet_gateway", &[vpc_id])?;
        Ok(self
            .state()
            .gateways
            .iter()
            .find(|(_, vpc)| vpc.as_deref() == Some(vpc_id))
            .map(|(id, _)| id.clone()))
    }

    fn create_internet_gateway(&self, tags: &Tags) -> ProviderResult<String> {
        self.call("create_internet_gateway", &[])?;
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.id("igw");
            state.gateways.insert(id.clone(), None);
            id
        };
        self.tag(&id, tags);
        Ok(id)
    }

    fn attach_internet_gateway(&self, gateway_id: &str, vpc_id: &str) -> ProviderResult<()> {
        self.call("attach_internet_gateway", &[gateway_id, vpc_id])?;
        self.state
            .borrow_mut()
            .gateways
            .insert(gateway_id.to_string(), Some(vpc_id.to_string()));
        Ok(())
    }

    fn route_tables(&self, vpc_id: &str) -> ProviderResult<Vec<RouteTableInfo>> {
        self.call("route_tables", &[vpc_id])?;
        Ok(self
            .state()
            .route_tables
            .iter()
            .filter(|(vpc, _)| vpc == vpc_id)
            .map(|(_, table)| table.clone())
            .collect())
    }

    fn create_route_table(&self, vpc_id: &str, tags: &Tags) -> ProviderResult<String> {
        self.call("create_route_table", &[vpc_id])?;
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.id("rtb");
            state.route_tables.push((
                vpc_id.to_string(),
                RouteTableInfo {
                    id: id.clone(),
                    ..RouteTableInfo::default()
                },
            ));
            id
        };
        self.tag(&id, tags);
        Ok(id)
    }

    fn create_default_route(&self, route_table_id: &str, gateway_id: &str) -> ProviderResult<()> {
        self.call("create_default_route", &[route_table_id, gateway_id])?;
        let mut state = self.state.borrow_mut();
        if let Some((_, table)) = state
            .route_tables
            .iter_mut()
            .find(|(_, t)| t.id == route_table_id)
        {
            table.default_route_gateways.push(gateway_id.to_string());
        }
        Ok(())
    }

    fn associate_route_table(&self, route_table_id: &str, subnet_id: &str) -> ProviderResult<()> {
        self.call("associate_route_table", &[route_table_id, subnet_id])?;
        let mut state = self.state.borrow_mut();
        if let Some((_, table)) = state
            .route_tables
            .iter_mut()
            .find(|(_, t)| t.id == route_table_id)
        {
            table.subnet_associations.push(subnet_id.to_string());
        }
        Ok(())
    }
}

impl EnvironmentService for FakeCloud {
    fn application_exists(&self, application: &str) -> ProviderResult<bool> {
        self.call("application_exists", &[application])?;
        Ok(self.state().applications.contains(application))
    }

    fn create_application(&self, application: &str) -> ProviderResult<()> {
        self.call("create_application", &[application])?;
        self.state
            .borrow_mut()
            .applications
            .insert(application.to_string());
        Ok(())
    }

    fn create_application_version(
        &self,
        application: &str,
        version_label: &VersionLabel,
        source: &ArtifactLocation,
        description: &str,
    ) -> ProviderResult<()> {
        let uri = source.uri();
        self.call(
            "create_application_version",
            &[application, version_label.as_str(), uri.as_str()],
        )?;
        self.state.borrow_mut().versions.push(FakeVersion {
            application: application.to_string(),
            label: version_label.to_string(),
            source: uri,
            description: description.to_string(),
        });
        Ok(())
    }

    fn environment_status(
        &self,
        application: &str,
        environment: &str,
    ) -> ProviderResult<Option<EnvironmentStatus>> {
        self.call("environment_status", &[application, environment])?;
        let mut state = self.state.borrow_mut();
        if state.deploy_issued {
            if let Some((status, health)) = state.poll_script.pop_front() {
                if let Some(env) = state.environment.as_mut() {
                    env.status = status;
                    env.health = health;
                }
            }
        }
        Ok(state.environment.as_ref().map(|e| e.status.clone()))
    }

    fn environment_health(
        &self,
        application: &str,
        environment: &str,
    ) -> ProviderResult<EnvironmentHealth> {
        self.call("environment_health", &[application, environment])?;
        Ok(self
            .state()
            .environment
            .as_ref()
            .map(|e| e.health.clone())
            .unwrap_or(EnvironmentHealth::Grey))
    }

    fn environment_vpc(
        &self,
        application: &str,
        environment: &str,
    ) -> ProviderResult<Option<String>> {
        self.call("environment_vpc", &[application, environment])?;
        Ok(self.state().environment.as_ref().and_then(|e| e.vpc.clone()))
    }

    fn create_environment(&self, request: &CreateEnvironment<'_>) -> ProviderResult<()> {
        self.call(
            "create_environment",
            &[request.application, request.environment],
        )?;
        let mut state = self.state.borrow_mut();
        state.requests.push(EnvironmentRequest {
            version_label: request.version_label.to_string(),
            solution_stack: Some(request.solution_stack.to_string()),
            options: request.options.clone(),
        });
        state.environment = Some(FakeEnvironment {
            status: EnvironmentStatus::Launching,
            health: EnvironmentHealth::Grey,
            vpc: request
                .options
                .get(crate::domain::entities::namespaces::VPC, "VPCId")
                .map(str::to_string),
        });
        state.deploy_issued = true;
        Ok(())
    }

    fn update_environment(&self, request: &UpdateEnvironment<'_>) -> ProviderResult<()> {
        self.call(
            "update_environment",
            &[request.application, request.environment],
        )?;
        let mut state = self.state.borrow_mut();
        state.requests.push(EnvironmentRequest {
            version_label: request.version_label.to_string(),
            solution_stack: None,
            options: request.options.clone(),
        });
        if let Some(env) = state.environment.as_mut() {
            env.status = EnvironmentStatus::Updating;
        }
        state.deploy_issued = true;
        Ok(())
    }

    fn recent_events(
        &self,
        application: &str,
        environment: &str,
        limit: usize,
    ) -> ProviderResult<Vec<EnvironmentEvent>> {
        self.call("recent_events", &[application, environment])?;
        Ok(self.state().env_events.iter().take(limit).cloned().collect())
    }
}

/// Clock that records requested sleeps instead of sleeping
#[derive(Debug, Default)]
pub struct RecordingClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingClock {
    pub const fn new() -> Self {
        Self {
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Clock for RecordingClock {
    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Test event sink that records all events
#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<DeployEvent>>,
    detailed: bool,
}

impl RecordingEventSink {
    /// Sink that also asks for `ResourceFound` events
    pub fn detailed() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            detailed: true,
        }
    }

    pub fn events(&self) -> Vec<DeployEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl DeployEventSink for RecordingEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn wants_detailed_events(&self) -> bool {
        self.detailed
    }
}
