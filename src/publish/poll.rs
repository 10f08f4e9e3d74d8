use std::time::Duration;

use crate::amo::AddonsApi;
use crate::publish::{PublishError, clock::Clock};
use crate::types::amo::UploadHandle;
use crate::utils::logger::{LogLevel, Logger};
use crate::utils::spinner::Spinner;

pub const CHECK_UPLOAD_INTERVAL: Duration = Duration::from_millis(3000);
pub const CHECK_UPLOAD_TIMEOUT: Duration = Duration::from_millis(20000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        PollSettings {
            interval: CHECK_UPLOAD_INTERVAL,
            timeout: CHECK_UPLOAD_TIMEOUT,
        }
    }
}

/// Polls the upload on a fixed interval until AMO has finished validating it.
///
/// The first check happens one interval after the call. Once more than
/// `timeout` has passed since the call, the next unprocessed answer ends the
/// wait with [`PublishError::Timeout`].
pub async fn wait_until_processed<A, C>(
    api: &A,
    clock: &C,
    uuid: &str,
    settings: PollSettings,
) -> Result<UploadHandle, PublishError>
where
    A: AddonsApi + ?Sized,
    C: Clock + ?Sized,
{
    let started = clock.now();
    let spinner = Spinner::new(format!("Waiting for upload \"{}\" to be processed", uuid));
    let mut attempts: u32 = 0;

    loop {
        clock.sleep(settings.interval).await;
        attempts += 1;

        let status = api.get_upload(uuid).await?;
        if status.processed {
            spinner.succeed(format!("Addon \"{}\" has been processed", uuid));
            if !status.valid {
                Logger::new().log_message(
                    LogLevel::Warning,
                    &format!("Upload \"{}\" did not pass validation", uuid),
                );
            }
            return Ok(status);
        }

        let elapsed = clock.now().saturating_duration_since(started);
        if elapsed > settings.timeout {
            return Err(PublishError::Timeout {
                uuid: uuid.to_string(),
                elapsed,
            });
        }

        spinner.set_message(format!(
            "Waiting for upload \"{}\" to be processed (check {})",
            uuid, attempts
        ));
    }
}
