use redis_cache::dispatcher::dispatch;
use redis_cache::store::Stores;

fn parts(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn set_then_get() {
    let stores = Stores::new();
    assert_eq!(dispatch(&parts(&["SET", "foo", "bar"]), &stores).await, b"+OK\r\n");
    assert_eq!(dispatch(&parts(&["GET", "foo"]), &stores).await, b"$3\r\nbar\r\n");
}

#[tokio::test]
async fn get_missing_key_is_null_bulk() {
    let stores = Stores::new();
    assert_eq!(dispatch(&parts(&["GET", "ghost"]), &stores).await, b"$-1\r\n");
}

#[tokio::test]
async fn set_overwrites_existing_value_and_expiry() {
    let stores = Stores::new();
    dispatch(&parts(&["SET", "k", "v1", "EX", "100"]), &stores).await;
    dispatch(&parts(&["SET", "k", "v2"]), &stores).await;
    assert_eq!(dispatch(&parts(&["GET", "k"]), &stores).await, b"$2\r\nv2\r\n");
}

#[tokio::test]
async fn set_px_expires_after_deadline() {
    let stores = Stores::new();
    dispatch(&parts(&["SET", "k", "v", "PX", "5"]), &stores).await;
    tokio::time::sleep(std::time::Duration::from_millis(25)).await;
    assert_eq!(dispatch(&parts(&["GET", "k"]), &stores).await, b"$-1\r\n");
}

#[tokio::test]
async fn set_ex_expires_after_deadline() {
    let stores = Stores::new();
    dispatch(&parts(&["SET", "k", "v", "EX", "-1"]), &stores).await;
    assert_eq!(dispatch(&parts(&["GET", "k"]), &stores).await, b"$-1\r\n");
}

#[tokio::test]
async fn set_rejects_bad_expiry_unit() {
    let stores = Stores::new();
    let reply = dispatch(&parts(&["SET", "k", "v", "ZZ", "1"]), &stores).await;
    assert!(reply.starts_with(b"-ERR syntax error"));
}

#[tokio::test]
async fn set_rejects_non_integer_expiry_count() {
    let stores = Stores::new();
    let reply = dispatch(&parts(&["SET", "k", "v", "EX", "soon"]), &stores).await;
    assert!(reply.starts_with(b"-ERR value is not an integer"));
}

#[tokio::test]
async fn get_wrong_arity_is_error() {
    let stores = Stores::new();
    let reply = dispatch(&parts(&["GET"]), &stores).await;
    assert!(reply.starts_with(b"-ERR wrong number of arguments for 'get'"));
}
