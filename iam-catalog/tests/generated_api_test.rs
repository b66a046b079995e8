//! Integration tests for the generated service API
//!
//! The typed builders and the runtime catalogue are produced from the same data
//! files; these tests check that they agree with each other.

use iam_catalog::services::{self, comprehend, deepracer, frauddetector, mediaconvert};
use iam_catalog::{is_valid_action_name, ActionName, ArnTemplate, Catalog, Substitutions};

fn catalog() -> Catalog {
    Catalog::embedded().expect("embedded catalogue should load")
}

#[test]
fn test_detector_arn_with_region_and_path() {
    let arn = frauddetector::resources::detector(&frauddetector::resources::DetectorArn {
        region: Some("us-east-1"),
        resource_path: Some("myDetector"),
        ..Default::default()
    });
    assert_eq!(arn, "arn:*:frauddetector:us-east-1:*:detector/myDetector");
}

#[test]
fn test_leaderboard_arn_without_arguments() {
    let arn = deepracer::resources::leaderboard(&Default::default());
    assert_eq!(arn, "arn:*:deepracer:*::leaderboard/*");
}

#[test]
fn test_values_are_embedded_verbatim() {
    let arn = mediaconvert::resources::certificate_association(
        &mediaconvert::resources::CertificateAssociationArn {
            certificate_arn: Some("arn:aws:acm:us-east-1:111122223333:certificate/abc"),
            ..Default::default()
        },
    );
    assert_eq!(
        arn,
        "arn:*:mediaconvert:*:*:certificates/arn:aws:acm:us-east-1:111122223333:certificate/abc"
    );
}

#[test]
fn test_empty_value_renders_as_wildcard() {
    let args = comprehend::resources::FlywheelDatasetArn {
        account: Some(""),
        flywheel_name: Some("reviews"),
        ..Default::default()
    };
    assert_eq!(
        comprehend::resources::flywheel_dataset(&args),
        "arn:*:comprehend:*:*:flywheel/reviews/dataset/*"
    );
    assert_eq!(
        comprehend::resources::flywheel_dataset(&args),
        comprehend::resources::flywheel_dataset(&args)
    );
}

#[test]
fn test_generated_structs_are_placeholder_values() {
    let args = frauddetector::resources::DetectorArn {
        partition: Some("aws"),
        ..Default::default()
    };
    let rendered = catalog()
        .render_arn("frauddetector", "detector", &args)
        .expect("detector exists");
    assert_eq!(rendered, "arn:aws:frauddetector:*:*:detector/*");
}

#[test]
fn test_action_constants() {
    assert_eq!(
        comprehend::actions::DETECT_SENTIMENT,
        "comprehend:DetectSentiment"
    );
    assert_eq!(frauddetector::actions::GET_DETECTORS, "frauddetector:GetDetectors");
    assert_eq!(deepracer::actions::ALL, "deepracer:*");
    assert_eq!(mediaconvert::SERVICE, "mediaconvert");
}

#[test]
fn test_every_action_constant_is_well_formed() {
    for (service, actions) in services::SERVICE_ACTIONS {
        assert!(!actions.is_empty(), "{} has no actions", service);
        for action in *actions {
            assert!(is_valid_action_name(action), "{}", action);
            let parsed = ActionName::parse(action).expect("valid action name");
            assert_eq!(parsed.namespace(), *service);
            assert!(!parsed.is_wildcard());
        }
    }

    for wildcard in [
        comprehend::actions::ALL,
        deepracer::actions::ALL,
        frauddetector::actions::ALL,
        mediaconvert::actions::ALL,
    ] {
        assert!(is_valid_action_name(wildcard), "{}", wildcard);
    }
}

#[test]
fn test_generated_actions_match_catalog() {
    let catalog = catalog();
    let names: Vec<&str> = catalog.services().map(|s| s.name()).collect();
    assert_eq!(names, services::SERVICES);

    for (service, actions) in services::SERVICE_ACTIONS {
        let definition = catalog.service(service).expect("service exists");
        let qualified: Vec<String> = definition.qualified_actions().collect();
        assert_eq!(&qualified, actions, "{}", service);
        for action in *actions {
            assert!(catalog.contains_action(action), "{}", action);
        }
    }
}

#[test]
fn test_generated_resources_match_catalog() {
    let catalog = catalog();
    let services: Vec<&str> = services::SERVICE_RESOURCE_TYPES
        .iter()
        .map(|(service, _)| *service)
        .collect();
    assert_eq!(services, services::SERVICES);

    for (service, resources) in services::SERVICE_RESOURCE_TYPES {
        let definition = catalog.service(service).expect("service exists");
        assert_eq!(definition.resources().len(), resources.len(), "{}", service);
        for (name, arn_format) in *resources {
            let resource = catalog.resource(service, name).expect("resource exists");
            assert_eq!(resource.arn_format(), *arn_format);
            ArnTemplate::parse(arn_format).expect("template parses");
        }
    }
}

#[test]
fn test_builder_and_catalog_render_the_same_arn() {
    let catalog = catalog();
    let values = Substitutions::new()
        .with("appId", "d1x2y3")
        .with("branch_name", "main")
        .with("JobId", "42");

    let from_catalog = catalog
        .render_arn("amplify", "jobs", &values)
        .expect("jobs exists");
    let from_builder = services::amplify::resources::jobs(&services::amplify::resources::JobsArn {
        app_id: Some("d1x2y3"),
        branch_name: Some("main"),
        job_id: Some("42"),
        ..Default::default()
    });

    assert_eq!(from_catalog, from_builder);
    assert_eq!(
        from_builder,
        "arn:*:amplify:*:*:apps/d1x2y3/branches/main/jobs/42"
    );
}

#[test]
fn test_default_arguments_match_wildcard_rendering() {
    let catalog = catalog();
    for (service, resources) in services::SERVICE_RESOURCE_TYPES {
        assert!(!resources.is_empty(), "{} has no resource types", service);
        for (name, arn_format) in *resources {
            let template = ArnTemplate::parse(arn_format).expect("template parses");
            let rendered = catalog
                .render_arn(service, name, &())
                .expect("resource exists");
            assert_eq!(rendered, template.render_wildcard(), "{}/{}", service, name);
            assert!(!rendered.contains("${"), "{}", rendered);
            assert!(
                template.placeholders().count() == 0 || rendered.contains('*'),
                "{}",
                rendered
            );
        }
    }

    assert_eq!(
        deepracer::resources::reinforcement_learning_model(&Default::default()),
        "arn:*:deepracer:*:*:model/reinforcement_learning/*"
    );
    assert_eq!(
        services::amplify::resources::domains(&Default::default()),
        "arn:*:amplify:*:*:apps/*/domains/*"
    );
    assert_eq!(
        comprehend::resources::entity_recognizer(&Default::default()),
        "arn:*:comprehend:*:*:entity-recognizer/*"
    );
    assert_eq!(
        frauddetector::resources::detector(&Default::default()),
        "arn:*:frauddetector:*:*:detector/*"
    );
    assert_eq!(
        mediaconvert::resources::job_template(&Default::default()),
        "arn:*:mediaconvert:*:*:jobTemplates/*"
    );
}
