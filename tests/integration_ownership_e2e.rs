use once_cell::sync::Lazy;
use redis::aio::ConnectionManager;
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

// Shared test context
struct TestContext {
    client: reqwest::Client,
    base_url: String,
}

static REDIS_CLIENT: Lazy<redis::Client> = Lazy::new(|| {
    let url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/".to_string());
    redis::Client::open(url).unwrap()
});

impl TestContext {
    fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .unwrap(),
            base_url: base_url.to_string(),
        }
    }

    fn get_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }
}

// These tests need a running server plus live Postgres and Redis; they skip
// unless E2E_BASE_URL points at one (e.g. http://127.0.0.1:3000).
fn server_base_url() -> Option<String> {
    std::env::var("E2E_BASE_URL").ok()
}

async fn get_redis_conn() -> ConnectionManager {
    REDIS_CLIENT.get_connection_manager().await.unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn setup() {
        let mut con = get_redis_conn().await;
        let _: () = redis::cmd("DEL")
            .arg("rate_limit:register:127.0.0.1")
            .query_async(&mut con)
            .await
            .unwrap();
    }

    async fn register(context: &TestContext, email: &str) {
        let response = context
            .client
            .post(format!("{}/api/auth/register", context.base_url))
            .json(&json!({
                "name": "Test Beekeeper",
                "email": email,
                "password": "SecurePass123!@#"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 201, "Registration failed");
    }

    #[tokio::test]
    async fn test_cross_user_hive_access_reads_as_not_found() {
        let Some(base_url) = server_base_url() else {
            eprintln!("skipping: E2E_BASE_URL not set");
            return;
        };
        setup().await;

        let timestamp = TestContext::get_timestamp();
        let alice = TestContext::new(&base_url);
        let bob = TestContext::new(&base_url);
        register(&alice, &format!("alice_{}@example.com", timestamp)).await;
        register(&bob, &format!("bob_{}@example.com", timestamp)).await;

        // Alice creates a hive
        let create_response = alice
            .client
            .post(format!("{}/api/hives", base_url))
            .json(&json!({
                "name": "North field",
                "location": "Orchard"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(create_response.status().as_u16(), 201, "Hive creation failed");
        let hive: Value = create_response.json().await.unwrap();
        let hive_id = hive["id"].as_str().unwrap().to_string();

        // Bob cannot update it
        let update_response = bob
            .client
            .put(format!("{}/api/hives/{}", base_url, hive_id))
            .json(&json!({ "name": "Hijacked hive" }))
            .send()
            .await
            .unwrap();

        assert_eq!(update_response.status().as_u16(), 404);

        // Bob cannot delete it
        let delete_response = bob
            .client
            .delete(format!("{}/api/hives/{}", base_url, hive_id))
            .send()
            .await
            .unwrap();

        assert_eq!(delete_response.status().as_u16(), 404);

        // A nonexistent id reads the same way
        let missing_response = bob
            .client
            .delete(format!(
                "{}/api/hives/00000000-0000-0000-0000-000000000000",
                base_url
            ))
            .send()
            .await
            .unwrap();

        assert_eq!(missing_response.status().as_u16(), 404);

        // Alice's hive is untouched
        let list_response = alice
            .client
            .get(format!("{}/api/hives", base_url))
            .send()
            .await
            .unwrap();

        assert_eq!(list_response.status().as_u16(), 200);
        let hives: Value = list_response.json().await.unwrap();
        let survivor = hives
            .as_array()
            .unwrap()
            .iter()
            .find(|h| h["id"] == hive_id.as_str())
            .expect("Alice's hive disappeared");
        assert_eq!(survivor["name"], "North field");
    }

    #[tokio::test]
    async fn test_cross_user_task_access_reads_as_not_found() {
        let Some(base_url) = server_base_url() else {
            eprintln!("skipping: E2E_BASE_URL not set");
            return;
        };
        setup().await;

        let timestamp = TestContext::get_timestamp();
        let alice = TestContext::new(&base_url);
        let bob = TestContext::new(&base_url);
        register(&alice, &format!("alice_task_{}@example.com", timestamp)).await;
        register(&bob, &format!("bob_task_{}@example.com", timestamp)).await;

        let create_response = alice
            .client
            .post(format!("{}/api/tasks", base_url))
            .json(&json!({
                "description": "Requeen hive three",
                "due_date": "2026-09-15T12:00:00Z"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(create_response.status().as_u16(), 201, "Task creation failed");
        let task: Value = create_response.json().await.unwrap();
        let task_id = task["id"].as_str().unwrap().to_string();

        // Bob can neither complete nor delete Alice's task
        let complete_response = bob
            .client
            .post(format!("{}/api/tasks/{}/complete", base_url, task_id))
            .send()
            .await
            .unwrap();

        assert_eq!(complete_response.status().as_u16(), 404);

        let delete_response = bob
            .client
            .delete(format!("{}/api/tasks/{}", base_url, task_id))
            .send()
            .await
            .unwrap();

        assert_eq!(delete_response.status().as_u16(), 404);

        // The task is still incomplete for Alice
        let list_response = alice
            .client
            .get(format!("{}/api/tasks", base_url))
            .send()
            .await
            .unwrap();

        assert_eq!(list_response.status().as_u16(), 200);
        let tasks: Value = list_response.json().await.unwrap();
        let survivor = tasks
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["id"] == task_id.as_str())
            .expect("Alice's task disappeared");
        assert_eq!(survivor["completed"], false);
    }
}
