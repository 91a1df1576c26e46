//! Integration tests for the member endpoints
//!
//! - GET /member/me
//! - PUT /member/nickname
//! - PUT /member/profile-image

mod common;

#[cfg(test)]
mod member_tests {
    use super::common::{authorization, bearer, create_test_server};
    use serde_json::json;
    use sqlx::MySqlPool;

    #[sqlx::test(fixtures(path = "../fixtures", scripts("members")))]
    async fn test_get_my_profile(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(pool);

        let response = server
            .get("/member/me")
            .add_header(authorization(), bearer(3))
            .await;

        response.assert_status_ok();
        let profile: serde_json::Value = response.json();
        assert_eq!(profile["member_id"], 3);
        assert_eq!(profile["nickname"], "charlie");
        assert!(profile["profile_image_url"].is_null());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("members")))]
    async fn test_missing_token_is_forbidden(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(pool);

        let response = server.get("/member/me").await;

        response.assert_status_forbidden();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("members")))]
    async fn test_invalid_token_is_unauthorized(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(pool);

        let response = server
            .get("/member/me")
            .add_header(authorization(), "Bearer not_a_real_token")
            .await;

        response.assert_status_unauthorized();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("members")))]
    async fn test_token_of_unknown_member_is_unauthorized(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(pool);

        let response = server
            .get("/member/me")
            .add_header(authorization(), bearer(999))
            .await;

        response.assert_status_unauthorized();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("members")))]
    async fn test_update_nickname(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(pool.clone());

        let response = server
            .put("/member/nickname")
            .add_header(authorization(), bearer(1))
            .json(&json!({ "nickname": "ploggingqueen" }))
            .await;
        response.assert_status_ok();

        let nickname: String =
            sqlx::query_scalar("SELECT nickname FROM members WHERE member_id = 1")
                .fetch_one(&pool)
                .await?;
        assert_eq!(nickname, "ploggingqueen");

        // other members untouched
        let bob: String = sqlx::query_scalar("SELECT nickname FROM members WHERE member_id = 2")
            .fetch_one(&pool)
            .await?;
        assert_eq!(bob, "bob");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("members")))]
    async fn test_update_nickname_too_short(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(pool.clone());

        let response = server
            .put("/member/nickname")
            .add_header(authorization(), bearer(1))
            .json(&json!({ "nickname": "a" }))
            .await;

        response.assert_status_bad_request();
        let nickname: String =
            sqlx::query_scalar("SELECT nickname FROM members WHERE member_id = 1")
                .fetch_one(&pool)
                .await?;
        assert_eq!(nickname, "alice");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("members")))]
    async fn test_update_profile_image(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(pool);

        server
            .put("/member/profile-image")
            .add_header(authorization(), bearer(3))
            .json(&json!({ "profile_image_url": "https://img.plogging.test/charlie.png" }))
            .await
            .assert_status_ok();

        let profile: serde_json::Value = server
            .get("/member/me")
            .add_header(authorization(), bearer(3))
            .await
            .json();
        assert_eq!(
            profile["profile_image_url"],
            "https://img.plogging.test/charlie.png"
        );
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("members")))]
    async fn test_update_profile_image_rejects_non_url(pool: MySqlPool) -> sqlx::Result<()> {
        let server = create_test_server(pool);

        let response = server
            .put("/member/profile-image")
            .add_header(authorization(), bearer(3))
            .json(&json!({ "profile_image_url": "not a url" }))
            .await;

        response.assert_status_bad_request();
        Ok(())
    }
}
