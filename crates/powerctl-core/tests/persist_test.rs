// End-to-end tests across the codec and the HTTP client: raw records are
// read from a wiremock server, hydrated, flattened, and written back, with
// the exact flat JSON asserted on the wire.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use powerctl_api::PowerApiClient;
use powerctl_core::{
    OutletWriter, flatten_device, flatten_record, hydrate_devices, outlet_host_intersection,
    reassign,
};

async fn setup() -> (MockServer, Arc<PowerApiClient>) {
    let server = MockServer::start().await;
    let base = server.uri().parse().unwrap();
    let client = Arc::new(PowerApiClient::with_client(reqwest::Client::new(), base));
    (server, client)
}

#[tokio::test]
async fn read_hydrate_flatten_update_round_trip() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/power_control_device/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "total_count": 1 },
            "objects": [{
                "id": "foo",
                "outlets": [
                    { "resource_uri": "foo" },
                    { "resource_uri": "bar" },
                    { "resource_uri": "baz" }
                ],
                "device_type": { "resource_uri": "test" }
            }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/power_control_device/foo/"))
        .and(body_json(json!({
            "id": "foo",
            "outlets": ["foo", "bar", "baz"],
            "device_type": "test"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "foo",
            "outlets": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let raw = client.list_devices().await.unwrap();
    let writer: Arc<dyn OutletWriter> = client.clone();
    let devices = hydrate_devices(raw, &writer).unwrap();

    let payload = flatten_device(&devices[0]);
    client.update_device("foo", &payload).await.unwrap();
}

#[tokio::test]
async fn flatten_create_posts_without_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/power_control_device/"))
        .and(body_json(json!({
            "outlets": ["foo", "bar", "baz"],
            "device_type": "test"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "9",
            "outlets": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = serde_json::from_value(json!({
        "outlets": [
            { "resource_uri": "foo" },
            { "resource_uri": "bar" },
            { "resource_uri": "baz" }
        ],
        "device_type": { "resource_uri": "test" }
    }))
    .unwrap();

    let payload = flatten_record(&record).unwrap();
    let created = client.create_device(&payload).await.unwrap();

    assert_eq!(created.id.as_deref(), Some("9"));
}

#[tokio::test]
async fn reassign_persists_detached_outlets_only() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/power_control_device/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "total_count": 1 },
            "objects": [{
                "id": "1",
                "outlets": [
                    {
                        "resource_uri": "/api/power_control_device_outlet/1/",
                        "identifier": "outlet 1",
                        "host": "1/2/3"
                    },
                    {
                        "resource_uri": "/api/power_control_device_outlet/2/",
                        "identifier": "outlet 2",
                        "host": "4/5/6"
                    },
                    {
                        "resource_uri": "/api/power_control_device_outlet/3/",
                        "identifier": "outlet 3",
                        "host": "1/2/3"
                    }
                ]
            }]
        })))
        .mount(&server)
        .await;

    // Only the detached outlet is written back, with an explicit null host.
    Mock::given(method("PUT"))
        .and(path("/api/power_control_device_outlet/1/"))
        .and(body_json(json!({
            "identifier": "outlet 1",
            "host": null
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let raw = client.list_devices().await.unwrap();
    let writer: Arc<dyn OutletWriter> = client.clone();
    let mut devices = hydrate_devices(raw, &writer).unwrap();
    let device = &mut devices[0];

    assert_eq!(
        outlet_host_intersection(device, "1/2/3"),
        vec!["outlet 1", "outlet 3"]
    );

    let pending = reassign(device, "1/2/3", &["outlet 3"]);
    for detach in pending {
        detach.task.await.unwrap().unwrap();
    }

    assert_eq!(device.outlets[0].host, None);
    assert_eq!(device.outlets[1].host.as_deref(), Some("4/5/6"));
    assert_eq!(device.outlets[2].host.as_deref(), Some("1/2/3"));
}
