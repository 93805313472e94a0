//! Property tests for version labels and artifact object keys.

use std::path::PathBuf;

use proptest::prelude::*;

use ebdeploy::domain::value_objects::{ArtifactInfo, ArtifactLocation, VersionLabel};

fn artifact(file_name: &str) -> ArtifactInfo {
    ArtifactInfo {
        path: PathBuf::from("build").join(file_name),
        size: 1,
        digest: "sha256:00".to_string(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the object key is `<application>/<label>.<ext>` and the label
    /// can never introduce another path segment.
    #[test]
    fn property_key_layout(
        app in "[a-z][a-z0-9-]{0,20}",
        label in "[A-Za-z0-9._-]{1,40}",
        stem in "[a-z]{1,8}",
        ext in proptest::option::of("(zip|war|jar|ZIP)"),
    ) {
        let Ok(version) = VersionLabel::parse(&label) else {
            return Err(TestCaseError::fail(format!("label {label:?} rejected")));
        };
        let file_name = match &ext {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem.clone(),
        };
        let expected_ext = ext.map(|e| e.to_ascii_lowercase()).unwrap_or_else(|| "zip".to_string());

        let location = ArtifactLocation::for_version("bucket", &app, &version, &artifact(&file_name));

        prop_assert_eq!(&location.key, &format!("{}/{}.{}", app, label, expected_ext));
        prop_assert_eq!(location.key.matches('/').count(), 1);
        prop_assert_eq!(location.uri(), format!("s3://bucket/{}", location.key));
    }

    /// PROPERTY: any label containing '/' is rejected.
    #[test]
    fn property_slash_labels_rejected(
        before in "[a-z0-9]{0,10}",
        after in "[a-z0-9]{0,10}",
    ) {
        let label = format!("{}/{}", before, after);
        prop_assert!(VersionLabel::parse(&label).is_err());
    }
}
