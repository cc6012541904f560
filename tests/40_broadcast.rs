mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

/// One sequential scenario so the recipient set stays deterministic: the
/// broadcast fan-out counts every unmuted user in the database.
#[tokio::test]
async fn broadcast_flow() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let url = format!("{}/broadcast", server.base_url);
    let init = common::admin_init();

    // unauthenticated and non-admin callers are rejected with distinct statuses
    let res = client
        .post(&url)
        .json(&json!({ "scope": "all", "text": "Hi" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(&url)
        .query(&[("init", common::signed_init_for(42, "alice"))])
        .json(&json!({ "scope": "all", "text": "Hi" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // literal scope needs a text
    let res = client
        .post(&url)
        .query(&[("init", init.clone())])
        .json(&json!({ "scope": "all" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // seed three unmuted users and one muted
    for user_id in [6001, 6002, 6003] {
        let res = client
            .post(format!("{}/users/unblock", server.base_url))
            .query(&[("init", init.clone())])
            .json(&json!({ "user_id": user_id }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }
    let res = client
        .post(format!("{}/users/block", server.base_url))
        .query(&[("init", init.clone())])
        .json(&json!({ "user_id": 6004 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // the channel is configured (token set) but points at a dead port, so
    // every attempt fails and is swallowed; the count is still the full set
    let res = client
        .post(&url)
        .query(&[("init", init.clone())])
        .json(&json!({ "scope": "all", "text": "Hi" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["ok"], true);
    assert_eq!(body["scope"], "all");
    assert_eq!(body["sent"], 3);

    // synthesized scope works without a text
    let res = client
        .post(&url)
        .query(&[("init", init)])
        .json(&json!({ "scope": "auto_homework" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["ok"], true);
    assert_eq!(body["scope"], "auto_homework");
    assert_eq!(body["sent"], 3);

    Ok(())
}
