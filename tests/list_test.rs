use std::sync::Arc;
use std::time::Duration;

use redis_cache::dispatcher::dispatch;
use redis_cache::store::Stores;

fn parts(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn rpush_appends_and_returns_length() {
    let stores = Stores::new();
    let reply = dispatch(&parts(&["RPUSH", "l", "a", "b", "c"]), &stores).await;
    assert_eq!(reply, b":3\r\n");
    assert_eq!(
        dispatch(&parts(&["LRANGE", "l", "0", "-1"]), &stores).await,
        b"*3\r\n$1\r\na\r\n$1\r\nb\r\n$1\r\nc\r\n"
    );
}

#[tokio::test]
async fn lpush_prepends_in_reverse_order() {
    let stores = Stores::new();
    dispatch(&parts(&["LPUSH", "l", "a", "b", "c"]), &stores).await;
    assert_eq!(
        dispatch(&parts(&["LRANGE", "l", "0", "-1"]), &stores).await,
        b"*3\r\n$1\r\nc\r\n$1\r\nb\r\n$1\r\na\r\n"
    );
}

#[tokio::test]
async fn llen_of_missing_key_is_zero() {
    let stores = Stores::new();
    assert_eq!(dispatch(&parts(&["LLEN", "ghost"]), &stores).await, b":0\r\n");
}

#[tokio::test]
async fn lpop_without_count_is_bulk_string() {
    let stores = Stores::new();
    dispatch(&parts(&["RPUSH", "l", "a", "b"]), &stores).await;
    assert_eq!(dispatch(&parts(&["LPOP", "l"]), &stores).await, b"$1\r\na\r\n");
}

#[tokio::test]
async fn lpop_with_count_is_array_even_for_one() {
    let stores = Stores::new();
    dispatch(&parts(&["RPUSH", "l", "a", "b"]), &stores).await;
    assert_eq!(
        dispatch(&parts(&["LPOP", "l", "1"]), &stores).await,
        b"*1\r\n$1\r\na\r\n"
    );
}

#[tokio::test]
async fn lpop_count_beyond_length_returns_whole_list_and_removes_key() {
    let stores = Stores::new();
    dispatch(&parts(&["RPUSH", "l", "a", "b"]), &stores).await;
    assert_eq!(
        dispatch(&parts(&["LPOP", "l", "10"]), &stores).await,
        b"*2\r\n$1\r\na\r\n$1\r\nb\r\n"
    );
    assert_eq!(dispatch(&parts(&["LLEN", "l"]), &stores).await, b":0\r\n");
}

#[tokio::test]
async fn lrange_clamps_out_of_bounds_indices() {
    let stores = Stores::new();
    dispatch(&parts(&["RPUSH", "l", "a", "b", "c"]), &stores).await;
    assert_eq!(
        dispatch(&parts(&["LRANGE", "l", "-100", "100"]), &stores).await,
        b"*3\r\n$1\r\na\r\n$1\r\nb\r\n$1\r\nc\r\n"
    );
    assert_eq!(
        dispatch(&parts(&["LRANGE", "l", "5", "10"]), &stores).await,
        b"*0\r\n"
    );
}

#[tokio::test]
async fn blpop_returns_immediately_when_data_present() {
    let stores = Stores::new();
    dispatch(&parts(&["RPUSH", "l", "a"]), &stores).await;
    assert_eq!(
        dispatch(&parts(&["BLPOP", "l", "0"]), &stores).await,
        b"*2\r\n$1\r\nl\r\n$1\r\na\r\n"
    );
}

#[tokio::test]
async fn blpop_times_out_to_null_array() {
    let stores = Stores::new();
    let reply = dispatch(&parts(&["BLPOP", "ghost", "0.02"]), &stores).await;
    assert_eq!(reply, b"*-1\r\n");
}

#[tokio::test]
async fn blpop_rejects_negative_timeout() {
    let stores = Stores::new();
    let reply = dispatch(&parts(&["BLPOP", "l", "-1"]), &stores).await;
    assert!(reply.starts_with(b"-ERR timeout is not a float"));
}

#[tokio::test]
async fn blpop_wakes_on_concurrent_rpush_and_reports_pushers_length() {
    let stores = Arc::new(Stores::new());
    let waiter_stores = stores.clone();
    let waiter = tokio::spawn(async move {
        dispatch(&parts(&["BLPOP", "l", "0"]), &waiter_stores).await
    });

    tokio::time::sleep(Duration::from_millis(20)).await;
    let push_reply = dispatch(&parts(&["RPUSH", "l", "late"]), &stores).await;
    assert_eq!(push_reply, b":1\r\n");

    assert_eq!(waiter.await.unwrap(), b"*2\r\n$1\r\nl\r\n$4\r\nlate\r\n");
}

#[tokio::test]
async fn lpush_does_not_wake_a_blpop_waiter() {
    let stores = Arc::new(Stores::new());
    let waiter_stores = stores.clone();
    let waiter = tokio::spawn(async move {
        dispatch(&parts(&["BLPOP", "l", "0.05"]), &waiter_stores).await
    });

    tokio::time::sleep(Duration::from_millis(10)).await;
    dispatch(&parts(&["LPUSH", "l", "v"]), &stores).await;

    assert_eq!(waiter.await.unwrap(), b"*-1\r\n");
    assert_eq!(
        dispatch(&parts(&["LRANGE", "l", "0", "-1"]), &stores).await,
        b"*1\r\n$1\r\nv\r\n"
    );
}

#[tokio::test]
async fn two_waiters_are_served_fifo() {
    let stores = Arc::new(Stores::new());
    let first = {
        let stores = stores.clone();
        tokio::spawn(async move { dispatch(&parts(&["BLPOP", "l", "5"]), &stores).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    let second = {
        let stores = stores.clone();
        tokio::spawn(async move { dispatch(&parts(&["BLPOP", "l", "5"]), &stores).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;

    dispatch(&parts(&["RPUSH", "l", "one", "two"]), &stores).await;

    assert_eq!(first.await.unwrap(), b"*2\r\n$1\r\nl\r\n$3\r\none\r\n");
    assert_eq!(second.await.unwrap(), b"*2\r\n$1\r\nl\r\n$3\r\ntwo\r\n");
}
