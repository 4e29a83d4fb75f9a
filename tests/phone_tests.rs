use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::body_string_contains;
use wiremock::MockServer;

mod common;

use axl_client::AxlError;
use common::{axl_fault, axl_no_return, axl_request, axl_return, setup_test_client};

#[tokio::test]
async fn test_get_phone() -> Result<(), AxlError> {
    let mock_server = MockServer::start().await;

    axl_request("getPhone")
        .and(body_string_contains(
            "<ns:getPhone><name>SEP001122334455</name></ns:getPhone>",
        ))
        .respond_with(axl_return(
            "getPhone",
            r#"<phone uuid="{0B0F1C2D-0000-0000-0000-000000000001}"><name>SEP001122334455</name><description>Lobby phone</description><model>Cisco 8845</model><lines><line uuid="{L1}"><index>1</index><dirn uuid="{D1}"><pattern>1000</pattern></dirn></line></lines></phone>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri()).await;
    let reply = client.phones().get("SEP001122334455").send().await?;

    assert!(reply.success);
    assert!(reply.error.is_none());
    assert_eq!(
        reply.response,
        Some(json!({
            "uuid": "{0B0F1C2D-0000-0000-0000-000000000001}",
            "name": "SEP001122334455",
            "description": "Lobby phone",
            "model": "Cisco 8845",
            "lines": {
                "line": {
                    "uuid": "{L1}",
                    "index": "1",
                    "dirn": { "uuid": "{D1}", "pattern": "1000" }
                }
            }
        }))
    );
    Ok(())
}

#[tokio::test]
async fn test_get_phone_by_uuid_with_returned_tags() -> Result<(), AxlError> {
    let mock_server = MockServer::start().await;

    axl_request("getPhone")
        .and(body_string_contains(
            "<ns:getPhone><uuid>{ABC}</uuid><returnedTags><name/><description/></returnedTags></ns:getPhone>",
        ))
        .respond_with(axl_return(
            "getPhone",
            "<phone><name>SEP1</name><description>x</description></phone>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri()).await;
    let reply = client
        .phones()
        .get("ignored")
        .uuid("{ABC}")
        .returned_tags(["name", "description"])
        .send()
        .await?;

    assert_eq!(reply.response, Some(json!({ "name": "SEP1", "description": "x" })));
    Ok(())
}

#[tokio::test]
async fn test_get_unknown_phone_reports_fault() -> Result<(), AxlError> {
    // Looking up a device that does not exist: the server answers with a
    // fault, which lands in `error` instead of failing the call.
    let mock_server = MockServer::start().await;

    axl_request("getPhone")
        .respond_with(axl_fault(
            "getPhone",
            5007,
            "Item not valid: The specified SEPFFFFFFFFFFFF was not found",
        ))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri()).await;
    let reply = client.phones().get("SEPFFFFFFFFFFFF").send().await?;

    assert!(!reply.success);
    assert!(reply.response.is_none());
    let fault = reply.error.expect("expected a fault");
    assert!(fault.message.contains("Item not valid"));
    assert_eq!(fault.axl_code, Some(5007));
    assert_eq!(fault.code, "soapenv:Server");
    Ok(())
}

#[tokio::test]
async fn test_empty_return_is_not_success() -> Result<(), AxlError> {
    let mock_server = MockServer::start().await;

    axl_request("getPhone")
        .respond_with(axl_return("getPhone", ""))
        .mount(&mock_server)
        .await;
    axl_request("applyPhone")
        .respond_with(axl_no_return("applyPhone"))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri()).await;

    let reply = client.phones().get("SEP001122334455").send().await?;
    assert!(!reply.success);
    assert!(reply.response.is_none());
    assert!(reply.error.is_none());

    let reply = client.phones().apply("SEP001122334455").send().await?;
    assert!(!reply.success);
    assert!(reply.response.is_none());
    assert!(reply.error.is_none());
    Ok(())
}

#[tokio::test]
async fn test_list_phones() -> Result<(), AxlError> {
    let mock_server = MockServer::start().await;

    axl_request("listPhone")
        .and(body_string_contains(
            "<ns:listPhone><searchCriteria><name>SEP%</name></searchCriteria><returnedTags><name/><model/></returnedTags><first>2</first></ns:listPhone>",
        ))
        .respond_with(axl_return(
            "listPhone",
            r#"<phone uuid="{1}"><name>SEP1</name><model>Cisco 7841</model></phone><phone uuid="{2}"><name>SEP2</name><model>Cisco 8845</model></phone>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri()).await;
    let reply = client
        .phones()
        .list()
        .search("name", "SEP%")
        .returned_tags(["name", "model"])
        .first(2)
        .send()
        .await?;

    assert!(reply.success);
    assert_eq!(
        reply.response,
        Some(json!([
            { "uuid": "{1}", "name": "SEP1", "model": "Cisco 7841" },
            { "uuid": "{2}", "name": "SEP2", "model": "Cisco 8845" }
        ]))
    );
    Ok(())
}

#[tokio::test]
async fn test_list_phones_defaults_to_all_names() -> Result<(), AxlError> {
    let mock_server = MockServer::start().await;

    axl_request("listPhone")
        .and(body_string_contains(
            "<searchCriteria><name>%</name></searchCriteria><returnedTags><name/></returnedTags>",
        ))
        .respond_with(axl_return("listPhone", "<phone><name>SEP1</name></phone>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri()).await;
    let reply = client.phones().list().send().await?;

    assert_eq!(reply.response, Some(json!([{ "name": "SEP1" }])));
    Ok(())
}

#[tokio::test]
async fn test_add_update_remove_phone() -> Result<(), AxlError> {
    let mock_server = MockServer::start().await;
    let uuid = "{9A8B7C6D-0000-0000-0000-000000000042}";

    axl_request("addPhone")
        .and(body_string_contains(
            "<ns:addPhone><phone><name>SEP001122334455</name><product>Cisco 8845</product><class>Phone</class><protocol>SIP</protocol><lines><line><index>1</index><dirn><pattern>1000</pattern><routePartitionName>Internal-PT</routePartitionName></dirn></line></lines></phone></ns:addPhone>",
        ))
        .respond_with(axl_return("addPhone", uuid))
        .expect(1)
        .mount(&mock_server)
        .await;

    axl_request("updatePhone")
        .and(body_string_contains(
            "<ns:updatePhone><name>SEP001122334455</name><description>Front desk</description></ns:updatePhone>",
        ))
        .respond_with(axl_return("updatePhone", uuid))
        .expect(1)
        .mount(&mock_server)
        .await;

    axl_request("removePhone")
        .and(body_string_contains("<ns:removePhone><uuid>"))
        .respond_with(axl_return("removePhone", uuid))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri()).await;
    let phones = client.phones();

    let added = phones
        .add(json!({
            "name": "SEP001122334455",
            "product": "Cisco 8845",
            "class": "Phone",
            "protocol": "SIP",
            "lines": {
                "line": [{
                    "index": 1,
                    "dirn": { "pattern": "1000", "routePartitionName": "Internal-PT" }
                }]
            }
        }))
        .send()
        .await?;
    assert!(added.success);
    assert_eq!(added.response, Some(json!(uuid)));

    let updated = phones
        .update("SEP001122334455")
        .set("description", "Front desk")
        .send()
        .await?;
    assert_eq!(updated.response, Some(json!(uuid)));

    let removed = phones.remove("SEP001122334455").uuid(uuid).send().await?;
    assert!(removed.success);
    Ok(())
}

#[tokio::test]
async fn test_reset_and_restart_phone() -> Result<(), AxlError> {
    let mock_server = MockServer::start().await;

    for operation in ["resetPhone", "restartPhone"] {
        axl_request(operation)
            .and(body_string_contains("<name>SEP001122334455</name>"))
            .respond_with(axl_return(operation, "{uuid}"))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = setup_test_client(&mock_server.uri()).await;
    assert!(client.phones().reset("SEP001122334455").send().await?.success);
    assert!(client.phones().restart("SEP001122334455").send().await?.success);
    Ok(())
}

#[tokio::test]
async fn test_repeated_reads_are_identical() -> Result<(), AxlError> {
    let mock_server = MockServer::start().await;

    axl_request("getPhone")
        .respond_with(axl_return("getPhone", "<phone><name>SEP1</name></phone>"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri()).await;
    let first = client.phones().get("SEP1").send().await?;
    let second = client.phones().get("SEP1").send().await?;
    assert_eq!(first, second);
    Ok(())
}
