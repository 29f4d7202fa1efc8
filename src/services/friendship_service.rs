use sqlx::SqlitePool;
use tracing::info;

use crate::database::{friends_repo, requests_repo, user_repo};
use crate::engine::SocialGraph;
use crate::services::{required, ServiceError, ServiceResult};
use crate::util::normalize_email;

pub async fn list_friends(pool: &SqlitePool, email: &str) -> ServiceResult<Vec<String>> {
    Ok(friends_repo::list_friends(pool, &normalize_email(email)).await?)
}

/// Adds one directed edge. Friendships made through `accept_request` get both.
pub async fn add_friend_edge(
    pool: &SqlitePool,
    email: &str,
    friend_email: Option<&str>,
) -> ServiceResult<()> {
    let friend_email = normalize_email(&required(friend_email, "friendEmail required")?);
    let mut conn = pool.acquire().await?;
    friends_repo::insert_friend_edge(&mut conn, &normalize_email(email), &friend_email).await?;
    Ok(())
}

pub async fn remove_friend_edge(
    pool: &SqlitePool,
    email: &str,
    friend_email: Option<&str>,
) -> ServiceResult<()> {
    let friend_email = normalize_email(&required(friend_email, "friendEmail required")?);
    let mut conn = pool.acquire().await?;
    friends_repo::delete_friend_edge(&mut conn, &normalize_email(email), &friend_email).await?;
    Ok(())
}

pub async fn list_requests(pool: &SqlitePool, email: &str) -> ServiceResult<Vec<String>> {
    Ok(requests_repo::list_requests(pool, &normalize_email(email)).await?)
}

pub async fn add_request_edge(
    pool: &SqlitePool,
    email: &str,
    from_email: Option<&str>,
) -> ServiceResult<()> {
    let from_email = normalize_email(&required(from_email, "fromEmail required")?);
    let mut conn = pool.acquire().await?;
    requests_repo::insert_request(&mut conn, &normalize_email(email), &from_email).await?;
    Ok(())
}

pub async fn delete_request(
    pool: &SqlitePool,
    email: &str,
    from_email: Option<&str>,
) -> ServiceResult<()> {
    let from_email = normalize_email(&required(from_email, "fromEmail required")?);
    let mut conn = pool.acquire().await?;
    requests_repo::delete_request(&mut conn, &normalize_email(email), &from_email).await?;
    Ok(())
}

/// Sends a friend request from `sender` to `target`.
///
/// Both sides must be registered accounts; guests have no row to attach the
/// request to.
pub async fn send_request(
    pool: &SqlitePool,
    sender: &str,
    target: Option<&str>,
) -> ServiceResult<()> {
    let sender = normalize_email(sender);
    let target = normalize_email(&required(target, "targetEmail required")?);

    if sender == target {
        return Err(ServiceError::BadRequest(
            "cannot send a request to yourself".into(),
        ));
    }
    if !user_repo::user_exists(pool, &sender).await?
        || !user_repo::user_exists(pool, &target).await?
    {
        return Err(ServiceError::NotFound("not found".into()));
    }

    let friends = friends_repo::list_friends(pool, &sender).await?;
    if friends.contains(&target) {
        return Err(ServiceError::Conflict("already friends".into()));
    }

    let mut conn = pool.acquire().await?;
    requests_repo::insert_request(&mut conn, &target, &sender).await?;
    info!("🤝 Friend request {} -> {}", sender, target);
    Ok(())
}

/// Accepts a pending request from `sender` to `recipient`: both friend edges
/// are written and requests in either direction are dropped, atomically.
pub async fn accept_request(
    pool: &SqlitePool,
    recipient: &str,
    sender: Option<&str>,
) -> ServiceResult<()> {
    let recipient = normalize_email(recipient);
    let sender = normalize_email(&required(sender, "fromEmail required")?);

    let pending = requests_repo::list_requests(pool, &recipient).await?;
    if !pending.contains(&sender) {
        return Err(ServiceError::NotFound("no pending request".into()));
    }

    let mut tx = pool.begin().await?;
    friends_repo::insert_friend_edge(&mut tx, &recipient, &sender).await?;
    friends_repo::insert_friend_edge(&mut tx, &sender, &recipient).await?;
    requests_repo::delete_request(&mut tx, &recipient, &sender).await?;
    requests_repo::delete_request(&mut tx, &sender, &recipient).await?;
    tx.commit().await?;

    info!("🤝 {} accepted {}", recipient, sender);
    Ok(())
}

pub async fn decline_request(
    pool: &SqlitePool,
    recipient: &str,
    sender: Option<&str>,
) -> ServiceResult<()> {
    delete_request(pool, recipient, sender).await
}

/// Removes both directed edges between `email` and `friend_email`.
pub async fn remove_friendship(
    pool: &SqlitePool,
    email: &str,
    friend_email: Option<&str>,
) -> ServiceResult<()> {
    let email = normalize_email(email);
    let friend_email = normalize_email(&required(friend_email, "friendEmail required")?);

    let mut tx = pool.begin().await?;
    friends_repo::delete_friend_edge(&mut tx, &email, &friend_email).await?;
    friends_repo::delete_friend_edge(&mut tx, &friend_email, &email).await?;
    tx.commit().await?;
    Ok(())
}

/// The slice of the social graph suggestions need: the requester's edges,
/// their friends' edges and the requester's pending requests.
pub async fn load_social_graph(pool: &SqlitePool, email: &str) -> ServiceResult<SocialGraph> {
    let mut graph = SocialGraph::new();
    for (owner, friend) in friends_repo::list_two_hop_edges(pool, email).await? {
        graph.add_friend_edge(&owner, &friend);
    }
    for sender in requests_repo::list_requests(pool, email).await? {
        graph.add_request_edge(email, &sender);
    }
    Ok(graph)
}
