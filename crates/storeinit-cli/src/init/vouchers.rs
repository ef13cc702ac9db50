use storeinit_core::fixtures::VOUCHER_TYPE_ENTIRE_ORDER;
use storeinit_core::{voucher_definitions, VoucherDefinition, DEFAULT_CHANNEL_SLUG};
use storeinit_db::{ChannelRow, NewVoucher, NewVoucherListing, StoreRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VoucherAction {
    /// Voucher, code and listing were all created.
    Created,
    /// The code existed; a listing on the channel was added.
    Linked,
    /// Code and listing already existed. Nothing was written.
    AlreadyPresent,
}

impl std::fmt::Display for VoucherAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoucherAction::Created => write!(f, "created"),
            VoucherAction::Linked => write!(f, "linked"),
            VoucherAction::AlreadyPresent => write!(f, "already present"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum VouchersOutcome {
    Provisioned {
        channel: String,
        vouchers: Vec<(VoucherDefinition, VoucherAction)>,
    },
    /// No channel exists; nothing was written.
    NoChannel,
}

/// Ensure each fixed voucher exists and is listed on the default channel.
pub(crate) async fn provision_vouchers<S>(store: &S) -> anyhow::Result<VouchersOutcome>
where
    S: StoreRepository + ?Sized,
{
    let channel = match store.find_channel_by_slug(DEFAULT_CHANNEL_SLUG).await? {
        Some(channel) => Some(channel),
        None => store.first_channel().await?,
    };
    let Some(channel) = channel else {
        tracing::error!("no channel found; voucher step skipped");
        eprintln!("error: no channel found; skipping vouchers");
        return Ok(VouchersOutcome::NoChannel);
    };

    if channel.slug != DEFAULT_CHANNEL_SLUG {
        tracing::warn!(
            channel = %channel.slug,
            "channel '{DEFAULT_CHANNEL_SLUG}' not found; using first channel"
        );
    }

    let mut vouchers = Vec::new();
    for definition in voucher_definitions() {
        let action = provision_voucher(store, &channel, &definition).await?;
        tracing::info!(code = definition.code, channel = %channel.slug, %action, "voucher provisioned");
        println!("voucher {} {action} on {}", definition.code, channel.slug);
        vouchers.push((definition, action));
    }

    Ok(VouchersOutcome::Provisioned {
        channel: channel.slug,
        vouchers,
    })
}

async fn provision_voucher<S>(
    store: &S,
    channel: &ChannelRow,
    definition: &VoucherDefinition,
) -> anyhow::Result<VoucherAction>
where
    S: StoreRepository + ?Sized,
{
    let listing = |voucher_id| NewVoucherListing {
        voucher_id,
        channel_id: channel.id,
        discount_value: definition.discount_value,
        min_spent_amount: definition.min_spent_amount,
        currency: definition.listing_currency(&channel.currency_code),
    };

    let Some(code) = store.find_voucher_code(definition.code).await? else {
        let voucher_id = store
            .insert_voucher_with_code(&NewVoucher {
                name: definition.name,
                voucher_type: VOUCHER_TYPE_ENTIRE_ORDER,
                discount_value_type: definition.kind.as_str(),
                code: definition.code,
            })
            .await?;
        store.insert_voucher_listing(&listing(voucher_id)).await?;
        return Ok(VoucherAction::Created);
    };

    if store
        .has_voucher_listing(code.voucher_id, channel.id)
        .await?
    {
        return Ok(VoucherAction::AlreadyPresent);
    }

    store.insert_voucher_listing(&listing(code.voucher_id)).await?;
    Ok(VoucherAction::Linked)
}
