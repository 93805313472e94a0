//! Property tests for environment option settings.

use proptest::prelude::*;

use ebdeploy::domain::entities::{namespaces, NetworkTopology, OptionSettingsBuilder, SubnetRef};

fn ident(prefix: &'static str) -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9]{4,12}")
        .unwrap()
        .prop_map(move |s| format!("{prefix}-{s}"))
}

fn topology() -> impl Strategy<Value = NetworkTopology> {
    (
        ident("vpc"),
        ident("subnet"),
        ident("subnet"),
        proptest::option::of((ident("subnet"), ident("subnet"))),
    )
        .prop_map(|(vpc, a, b, private)| NetworkTopology {
            vpc_id: vpc,
            public_subnets: [
                SubnetRef {
                    id: a,
                    zone: "eu-west-1a".to_string(),
                },
                SubnetRef {
                    id: b,
                    zone: "eu-west-1b".to_string(),
                },
            ],
            internet_gateway_id: "igw-1".to_string(),
            route_table_id: "rtb-1".to_string(),
            private_subnets: private.map(|(c, d)| [c, d]),
        })
}

fn base(instance_type: &str, min: u32, extra: u32) -> OptionSettingsBuilder {
    OptionSettingsBuilder::new()
        .instance_profile("aws-elasticbeanstalk-ec2-role")
        .instance_type(instance_type)
        .service_role("aws-elasticbeanstalk-service-role")
        .load_balanced()
        .enhanced_health()
        .scaling(min, min + extra)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a create payload always binds the network; an update payload never does.
    #[test]
    fn property_network_fields_only_on_create(
        topology in topology(),
        instance_type in "[a-z][0-9][a-z]?\\.(nano|micro|small|large)",
        min in 1u32..4,
        extra in 0u32..4,
    ) {
        let create = base(&instance_type, min, extra).network(&topology).build().unwrap();
        let update = base(&instance_type, min, extra).build().unwrap();

        prop_assert!(create.has_network_settings());
        prop_assert_eq!(create.get(namespaces::VPC, "VPCId"), Some(topology.vpc_id.as_str()));
        prop_assert_eq!(
            create.get(namespaces::VPC, "ELBSubnets").map(str::to_string),
            Some(topology.public_subnet_ids().join(","))
        );
        prop_assert_eq!(
            create.get(namespaces::VPC, "Subnets").map(str::to_string),
            Some(topology.instance_subnet_ids().join(","))
        );

        prop_assert!(!update.has_network_settings());
        prop_assert!(!update.contains(namespaces::VPC, "VPCId"));
        prop_assert_eq!(
            update.get(namespaces::INSTANCES, "InstanceTypes"),
            Some(instance_type.as_str())
        );
    }

    /// PROPERTY: setting the same option twice is rejected.
    #[test]
    fn property_duplicate_option_rejected(
        name in "[A-Za-z]{1,16}",
        first in "[a-z0-9]{1,8}",
        second in "[a-z0-9]{1,8}",
    ) {
        let result = OptionSettingsBuilder::new()
            .set(namespaces::ENVIRONMENT, &name, first)
            .set(namespaces::ENVIRONMENT, &name, second)
            .build();
        prop_assert!(result.is_err());
    }
}
