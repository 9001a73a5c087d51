// Posts moderation-action notices to the configured staff-log channel.
// Best effort: a missing channel or failed send is logged server-side and
// never surfaced to the invoker.

use crate::discord::commands::CommandCtx;
use serenity::all::ChannelId;

pub async fn post(cx: &CommandCtx, summary: String) {
    let Some(channel_id) = cx.data.config.staff_log_channel_id else {
        return;
    };

    if let Err(err) = ChannelId::new(channel_id)
        .say(&cx.serenity.http, summary)
        .await
    {
        tracing::warn!(
            channel_id,
            error = %err,
            "failed to post staff log entry"
        );
    }
}
