use anyhow::Context;

use super::{Store, StoreError};
use crate::auth::password::hash_password;
use crate::config::DEFAULT_ADMIN_PASSWORD;
use crate::models::activity::ActivityRequest;
use crate::models::user::Role;

pub const ADMIN_USERNAME: &str = "admin";

fn starter_catalog() -> Vec<ActivityRequest> {
    fn tags(moods: &[&str]) -> Vec<String> {
        moods.iter().map(|m| m.to_string()).collect()
    }

    vec![
        ActivityRequest {
            name: "Walk in the park".into(),
            description: Some("A relaxed walk in the fresh air".into()),
            budget: Some(0),
            time: Some(2),
            weather: Some("sunny".into()),
            people_count: Some(1),
            moods: tags(&["Neutral", "Good", "Cheerful"]),
        },
        ActivityRequest {
            name: "Read a book".into(),
            description: Some("Curl up somewhere cosy with a good book".into()),
            budget: Some(0),
            time: Some(3),
            weather: Some("cloudy".into()),
            people_count: Some(1),
            moods: tags(&["Calm", "Inspired"]),
        },
        ActivityRequest {
            name: "Coffee with a friend".into(),
            description: Some("Meet up and catch up over a cup of coffee".into()),
            budget: Some(300),
            time: Some(1),
            weather: Some("any".into()),
            people_count: Some(2),
            moods: tags(&["Cheerful", "Friendly"]),
        },
    ]
}

/// Creates the admin account and the starter catalog when they are missing.
/// Running it again is a no-op.
pub async fn seed(store: &dyn Store, admin_password: &str) -> anyhow::Result<()> {
    if store
        .find_user_by_username(ADMIN_USERNAME)
        .await
        .context("looking up admin user")?
        .is_none()
    {
        if admin_password == DEFAULT_ADMIN_PASSWORD {
            tracing::warn!("Seeding admin with the default password; set ADMIN_PASSWORD");
        }
        let hash = hash_password(admin_password).context("hashing admin password")?;
        match store.create_user(ADMIN_USERNAME, &hash, Role::Admin).await {
            Ok(admin) => tracing::info!(user_id = %admin.id, "Admin user created"),
            // Another instance won the race.
            Err(StoreError::Conflict) => {}
            Err(e) => return Err(e).context("creating admin user"),
        }
    }

    let existing = store
        .count_activities()
        .await
        .context("counting activities")?;
    if existing == 0 {
        let catalog = starter_catalog();
        for activity in &catalog {
            store
                .create_activity(activity)
                .await
                .with_context(|| format!("seeding activity {:?}", activity.name))?;
        }
        tracing::info!(count = catalog.len(), "Starter activities created");
    } else {
        tracing::info!(count = existing, "Catalog already populated");
    }

    Ok(())
}
