use sha1::{Digest, Sha1};

use crate::browser::Driver;
use crate::error::SuiteError;

/// Poll document.readyState until it reports "complete".
///
/// Exceeding the bound is a hard `NavigationTimeout`: the page never became
/// usable, so the scenario cannot continue.
pub fn wait_for_ready<D: Driver>(
    driver: &mut D,
    timeout_ms: u64,
    poll_ms: u64,
) -> Result<(), SuiteError> {
    let mut waited = 0u64;
    loop {
        if driver.ready_state()? == "complete" {
            return Ok(());
        }
        if waited >= timeout_ms {
            let url = driver.current_url().unwrap_or_else(|_| "unknown".into());
            return Err(SuiteError::NavigationTimeout {
                url,
                waited_ms: waited,
            });
        }
        driver.pause(poll_ms);
        waited += poll_ms;
    }
}

/// Fixed pause to tolerate client-side rendering latency (modal animations,
/// optimistic UI updates). Deliberately unbounded by any timeout: it always
/// runs to completion.
pub fn settle<D: Driver>(driver: &mut D, settle_ms: u64) {
    driver.pause(settle_ms);
}

/// Poll until two consecutive page-source hashes agree, meaning client-side
/// rendering has stopped churning the DOM.
///
/// Soft condition: returns Ok(false) when the bound expires without the DOM
/// stabilizing, and the caller proceeds anyway.
pub fn wait_for_stable_dom<D: Driver>(
    driver: &mut D,
    max_ms: u64,
    poll_ms: u64,
) -> Result<bool, SuiteError> {
    let mut waited = 0u64;
    let mut last_hash = source_hash(driver)?;

    while waited < max_ms {
        driver.pause(poll_ms);
        waited += poll_ms;

        let hash = source_hash(driver)?;
        if hash == last_hash {
            return Ok(true);
        }
        last_hash = hash;
    }

    Ok(false)
}

fn source_hash<D: Driver>(driver: &mut D) -> Result<[u8; 20], SuiteError> {
    let source = driver.page_source()?;
    let mut hasher = Sha1::new();
    hasher.update(source.as_bytes());
    Ok(hasher.finalize().into())
}
