//! Link following tests against a mock API server.

use abiquo_api::resources::{Disk, Repo, VirtualMachine};
use abiquo_api::{AbiquoClient, AbiquoError, Config, Dto, Links};
use serde::Deserialize;
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FOO: &str = "application/vnd.foo+json";
const TEMPLATES: &str = "application/vnd.abiquo.virtualmachinetemplates+json";
const DISK: &str = "application/vnd.abiquo.harddisk+json";

fn setup() -> (Runtime, MockServer) {
    let rt = Runtime::new().expect("failed to start runtime");
    let server = rt.block_on(MockServer::start());
    (rt, server)
}

fn client(server: &MockServer) -> AbiquoClient {
    AbiquoClient::basic(Config::new(format!("{}/api", server.uri())), "admin", "xabiquo")
        .expect("failed to build client")
}

fn links(value: serde_json::Value) -> Links {
    serde_json::from_value(value).expect("invalid links")
}

#[test]
fn test_follow_link_uses_href_and_media_type() {
    let (rt, server) = setup();
    let entity = links(json!([
        {"rel": "edit", "href": format!("{}/x/42", server.uri()), "type": FOO}
    ]));

    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/x/42"))
            .and(header("Accept", FOO))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
            .expect(1)
            .mount(&server),
    );

    #[derive(Deserialize)]
    struct Thing {
        id: u32,
    }

    let response = client(&server)
        .follow_link(&entity, "edit")
        .expect("failed to follow link");
    assert_eq!(response.status.as_u16(), 200);

    let thing: Thing = response.json().unwrap();
    assert_eq!(thing.id, 42);
}

#[test]
fn test_missing_relation_makes_no_request() {
    let (rt, server) = setup();
    let entity = links(json!([
        {"rel": "edit", "href": format!("{}/x/42", server.uri()), "type": FOO}
    ]));

    match client(&server).follow_link(&entity, "missing-rel") {
        Err(AbiquoError::LinkNotPresent { rel }) => assert_eq!(rel, "missing-rel"),
        other => panic!("expected LinkNotPresent, got {:?}", other),
    }

    let received = rt.block_on(server.received_requests()).unwrap();
    assert!(received.is_empty());
}

#[test]
fn test_failed_link_request_is_not_link_not_present() {
    let (rt, server) = setup();
    let entity = links(json!([
        {"rel": "edit", "href": format!("{}/x/42", server.uri()), "type": FOO}
    ]));

    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/x/42"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "collection": [{"code": "ERR-404", "message": "not found"}]
            })))
            .mount(&server),
    );

    match client(&server).follow_link(&entity, "edit") {
        Err(AbiquoError::Api {
            code,
            message,
            status,
        }) => {
            assert_eq!(code, "ERR-404");
            assert_eq!(message, "not found");
            assert_eq!(status, 404);
        }
        other => panic!("expected AbiquoError::Api, got {:?}", other),
    }
}

#[test]
fn test_repo_templates_follow_link_then_paginate() {
    let (rt, server) = setup();
    let uri = server.uri();

    let repo: Repo = serde_json::from_value(json!({
        "name": "main",
        "repositoryLocation": "nfs:/opt/vm_repository",
        "links": [
            {"rel": "virtualmachinetemplates", "href": format!("{}/api/admin/enterprises/1/datacenterrepositories/1/virtualmachinetemplates", uri), "type": TEMPLATES}
        ]
    }))
    .unwrap();

    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/api/admin/enterprises/1/datacenterrepositories/1/virtualmachinetemplates"))
            .and(header("Accept", TEMPLATES))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "links": [{"rel": "next", "href": format!("{}/api/templates/p2", uri), "type": TEMPLATES}],
                "collection": [{"id": 1, "name": "ubuntu"}, {"id": 2, "name": "centos"}]
            })))
            .expect(1)
            .mount(&server),
    );
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/api/templates/p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "collection": [{"id": 3, "name": "debian"}]
            })))
            .expect(1)
            .mount(&server),
    );

    let templates = repo.get_templates(&client(&server)).expect("failed to get templates");
    let names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["ubuntu", "centos", "debian"]);
}

#[test]
fn test_vm_without_disks_link() {
    let (rt, server) = setup();
    let vm = VirtualMachine::default();

    let err = vm.get_disks(&client(&server)).unwrap_err();
    assert!(err.partial.is_empty());
    assert!(matches!(err.error, AbiquoError::LinkNotPresent { .. }));

    let received = rt.block_on(server.received_requests()).unwrap();
    assert!(received.is_empty());
}

#[test]
fn test_disk_update_puts_to_edit_link() {
    let (rt, server) = setup();
    let disk: Disk = serde_json::from_value(json!({
        "links": [{"rel": "edit", "href": format!("{}/api/cloud/virtualdatacenters/1/disks/7", server.uri()), "type": DISK}],
        "id": 7,
        "label": "system",
        "sizeInMb": 2048
    }))
    .unwrap();

    rt.block_on(
        Mock::given(method("PUT"))
            .and(path("/api/cloud/virtualdatacenters/1/disks/7"))
            .and(header("Accept", DISK))
            .and(header("Content-Type", DISK))
            .and(body_string_contains("\"sizeInMb\":2048"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server),
    );

    disk.update(&client(&server)).expect("failed to update disk");
}

#[test]
fn test_disk_update_without_edit_link() {
    let (_rt, server) = setup();
    let disk = Disk::default();
    assert!(!disk.has_link("edit"));

    match disk.update(&client(&server)) {
        Err(AbiquoError::LinkNotPresent { rel }) => assert_eq!(rel, "edit"),
        other => panic!("expected LinkNotPresent, got {:?}", other),
    }
}

#[test]
fn test_vm_by_url_not_found() {
    let (rt, server) = setup();
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/api/cloud/virtualdatacenters/1/virtualappliances/1/virtualmachines/99"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "collection": [{"code": "VM-0", "message": "The requested virtual machine does not exist"}]
            })))
            .mount(&server),
    );

    let url = format!(
        "{}/api/cloud/virtualdatacenters/1/virtualappliances/1/virtualmachines/99",
        server.uri()
    );
    let err = client(&server).get_vm_by_url(&url).unwrap_err();
    assert!(err.is_not_found());
    match err {
        AbiquoError::NotFound { url: missing } => assert_eq!(missing, url),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_vm_by_url() {
    let (rt, server) = setup();
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/api/vms/5"))
            .and(header("Accept", "application/vnd.abiquo.virtualmachine+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "name": "ABQ_5",
                "label": "web",
                "state": "ON",
                "links": [{"rel": "edit", "href": format!("{}/api/vms/5", server.uri()), "type": "application/vnd.abiquo.virtualmachine+json"}]
            })))
            .mount(&server),
    );

    let c = client(&server);
    let vm = c
        .get_vm_by_url(&format!("{}/api/vms/5", server.uri()))
        .expect("failed to get vm");
    assert_eq!(vm.label, "web");
    assert_eq!(vm.state, "ON");
    assert!(vm.has_link("edit"));
}
