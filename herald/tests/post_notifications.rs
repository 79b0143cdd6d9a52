use std::time::Duration;

use herald::{
    DistributedCenter, Error, LocalCenter, Notification, NotificationCenter, Result, expect,
    matchers::{be_empty, equal},
    post_distributed_notifications, post_notifications,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn mismatch(result: Result) -> String {
    match result {
        Err(Error::Mismatch(message)) => message,
        other => panic!("expected a mismatch, got {other:?}"),
    }
}

/// A payload compared by value, rendered like an object handle.
#[derive(Debug, PartialEq)]
struct Marker;

#[test]
fn passes_when_no_notifications_are_posted() {
    init_tracing();
    let center = LocalCenter::new();
    expect(|| ())
        .to(post_notifications(be_empty(), &center))
        .unwrap();
}

#[test]
fn passes_when_expected_notification_is_posted() {
    init_tracing();
    let center = LocalCenter::new();
    let foo = Notification::new("Foo");
    expect(|| center.post(foo.clone()))
        .to(post_notifications(equal([foo.clone()]), &center))
        .unwrap();
}

#[test]
fn passes_when_all_expected_notifications_are_posted() {
    init_tracing();
    let center = LocalCenter::new();
    let n1 = Notification::new("Foo").with_payload(1);
    let n2 = Notification::new("Bar").with_payload(2);
    expect(|| -> Result {
        center.post(n1.clone())?;
        center.post(n2.clone())
    })
    .to(post_notifications(equal([n1.clone(), n2.clone()]), &center))
    .unwrap();
}

#[test]
fn fails_when_no_notifications_are_posted() {
    init_tracing();
    let center = LocalCenter::new();
    let foo = Notification::new("Foo");
    let message = mismatch(expect(|| ()).to(post_notifications(equal([foo.clone()]), &center)));
    assert_eq!(
        message,
        format!("expected to equal <[{foo}]>, got no notifications")
    );
    assert_eq!(
        message,
        "expected to equal <[name = Foo, payload = nil]>, got no notifications"
    );
}

#[test]
fn fails_when_notification_with_wrong_name_is_posted() {
    init_tracing();
    let center = LocalCenter::new();
    let n1 = Notification::new("Foo");
    let n2 = Notification::new(format!("{}a", n1.name()));
    let message = mismatch(
        expect(|| center.post(n2.clone())).to(post_notifications(equal([n1.clone()]), &center)),
    );
    assert_eq!(message, format!("expected to equal <[{n1}]>, got <[{n2}]>"));
    assert_eq!(
        message,
        "expected to equal <[name = Foo, payload = nil]>, got <[name = Fooa, payload = nil]>"
    );
}

#[test]
fn fails_when_notification_with_wrong_payload_is_posted() {
    init_tracing();
    let center = LocalCenter::new();
    let n1 = Notification::new("Foo");
    let n2 = Notification::new(n1.name()).with_payload(Marker);
    let message = mismatch(
        expect(|| center.post(n2.clone())).to(post_notifications(equal([n1.clone()]), &center)),
    );
    assert_eq!(
        message,
        "expected to equal <[name = Foo, payload = nil]>, got <[name = Foo, payload = Marker]>"
    );
}

#[test]
fn rejects_any_other_ordering() {
    init_tracing();
    let center = LocalCenter::new();
    let n1 = Notification::new("Foo").with_payload(1);
    let n2 = Notification::new("Bar").with_payload(2);
    let message = mismatch(
        expect(|| -> Result {
            center.post(n2.clone())?;
            center.post(n1.clone())
        })
        .to(post_notifications(equal([n1.clone(), n2.clone()]), &center)),
    );
    assert!(message.ends_with("got <[name = Bar, payload = 2, name = Foo, payload = 1]>"));
}

#[tokio::test]
async fn passes_when_expected_notification_is_eventually_posted() {
    init_tracing();
    let center = LocalCenter::new();
    let foo = Notification::new("Foo");
    let deferred = center.clone();
    let posted = foo.clone();

    expect(move || {
        let center = deferred.clone();
        let foo = posted.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1)).await;
            center.post(foo)
        });
    })
    .to_eventually(post_notifications(equal([foo]), &center))
    .await
    .unwrap();
}

#[tokio::test]
async fn passes_when_all_expected_notifications_are_posted_in_distributed_center() {
    init_tracing();
    let center = DistributedCenter::new().unwrap();
    let n1 = Notification::new("Foo").with_payload("1");
    let n2 = Notification::new("Bar").with_payload("2");

    expect(|| -> Result {
        center.post(n1.clone())?;
        center.post(n2.clone())
    })
    .to_eventually(post_distributed_notifications(
        equal([n1.clone(), n2.clone()]),
        &center,
        [n1.name(), n2.name()],
    ))
    .await
    .unwrap();
}

#[tokio::test]
async fn distributed_center_needs_declared_names() {
    init_tracing();
    let center = DistributedCenter::new().unwrap();
    let err = expect(|| center.post(Notification::new("Foo")))
        .to(post_notifications(be_empty(), &center))
        .unwrap_err();
    assert_eq!(err, Error::WildcardUnsupported);
    assert_eq!(center.subscription_count(), 0);
}
