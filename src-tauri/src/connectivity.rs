use std::{
    net::{TcpStream, ToSocketAddrs},
    thread,
    time::Duration,
};

const LOG_EVERY_N_ATTEMPTS: u64 = 30;

/// True when any address `target` (`host:port`) resolves to accepts a TCP connection.
pub(crate) fn probe_target(target: &str, timeout: Duration) -> bool {
    let timeout = timeout.max(Duration::from_millis(50));
    let addrs = match target.to_socket_addrs() {
        Ok(addrs) => addrs.collect::<Vec<_>>(),
        Err(_) => return false,
    };
    addrs
        .iter()
        .any(|address| TcpStream::connect_timeout(address, timeout).is_ok())
}

/// Blocks until `probe` reports connectivity. There is no timeout: the window
/// is never shown against a portal that cannot load.
pub(crate) fn wait_until_online<P, F>(mut probe: P, interval: Duration, log: F) -> u64
where
    P: FnMut() -> bool,
    F: Fn(&str),
{
    let mut attempts = 0_u64;
    loop {
        attempts += 1;
        if probe() {
            return attempts;
        }

        if attempts == 1 || attempts % LOG_EVERY_N_ATTEMPTS == 0 {
            log(&format!(
                "network unreachable after {attempts} attempt(s); retrying every {}ms",
                interval.as_millis()
            ));
        }
        thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, net::TcpListener};

    use super::*;

    #[test]
    fn probe_target_detects_listening_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
        let target = listener.local_addr().expect("listener address").to_string();
        assert!(probe_target(&target, Duration::from_millis(500)));
    }

    #[test]
    fn probe_target_reports_closed_port() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
        let target = listener.local_addr().expect("listener address").to_string();
        drop(listener);
        assert!(!probe_target(&target, Duration::from_millis(200)));
    }

    #[test]
    fn probe_target_rejects_unresolvable_target() {
        assert!(!probe_target("no port here", Duration::from_millis(50)));
    }

    #[test]
    fn wait_until_online_retries_until_probe_succeeds() {
        let mut remaining_failures = 3;
        let messages = RefCell::new(Vec::new());

        let attempts = wait_until_online(
            || {
                if remaining_failures == 0 {
                    return true;
                }
                remaining_failures -= 1;
                false
            },
            Duration::ZERO,
            |message| messages.borrow_mut().push(message.to_string()),
        );

        assert_eq!(attempts, 4);
        assert_eq!(messages.borrow().len(), 1);
        assert!(messages.borrow()[0].starts_with("network unreachable after 1 attempt"));
    }

    #[test]
    fn wait_until_online_returns_immediately_when_online() {
        let attempts = wait_until_online(|| true, Duration::from_secs(60), |_| {
            panic!("no retry should be logged")
        });
        assert_eq!(attempts, 1);
    }
}
