//! Discord side of the mod update workflow.
//!
//! Drives the status prompt through its stages, renders the Confirm/Edit buttons
//! and the edit form, and hands every decision to `ModUpdateService`.

use serenity::all::{
    ActionRow, ActionRowComponent, ButtonStyle, ChannelId, ComponentInteraction, Context,
    CreateActionRow, CreateButton, CreateInputText, CreateInteractionResponse, CreateModal,
    EditMessage, InputTextStyle, Member, Message, MessageId, ModalInteraction, RoleId, UserId,
};

use crate::{
    bot::command::{edit_modal_id, CONFIRM_MOD_UPDATE, EDIT_MOD_UPDATE},
    error::{update::UpdateError, AppError},
    model::{
        manifest::ManifestPatch,
        update::{Authorization, CommitOutcome, PendingUpdate, Requester},
    },
    service::mod_update::{download, proposal},
    state::AppState,
};

/// Edit form fields, in display order.
const FORM_FIELDS: [&str; 5] = ["forge_id", "id", "url", "file", "hash"];

/// Runs `-update <url>` up to the point where the prompt waits for a button press.
///
/// Ownership problems are reported by editing the prompt. Any other error is
/// returned so the caller can report it.
pub async fn run_update(
    state: &AppState,
    ctx: &Context,
    msg: &Message,
    url: &str,
) -> Result<(), AppError> {
    let requester = requester_from_message(state, ctx, msg).await?;
    let service = state.mod_updates();

    let authorization = match service.authorize(&requester) {
        Ok(authorization) => authorization,
        Err(e) => {
            tracing::info!("Refused update by {}: {}", requester.user_id, e);
            msg.reply(ctx, e.to_string()).await?;
            return Ok(());
        }
    };

    let mut prompt = msg.reply(ctx, format!("downloading <{}>...", url)).await?;
    let bytes = download::download_artifact(&state.http_client, url).await?;

    prompt
        .edit(ctx, EditMessage::new().content("unzipping..."))
        .await?;

    let patch = match proposal::propose(&bytes, url, authorization.restriction()) {
        Ok(patch) => patch,
        Err(e @ UpdateError::OwnershipMismatch { .. }) => {
            tracing::info!("Refused update by {}: {:?}", requester.user_id, e);
            prompt
                .edit(ctx, EditMessage::new().content(e.to_string()))
                .await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut summary = EditMessage::new().content(summary_content(&patch));
    let buttons = prompt_buttons(&patch, &authorization);
    if !buttons.is_empty() {
        summary = summary.components(vec![CreateActionRow::Buttons(buttons)]);
    }

    // Stage before the buttons appear so an immediate press finds the proposal
    service.stage(prompt.id.get(), patch).await;
    prompt.edit(ctx, summary).await?;

    Ok(())
}

/// Handles a Confirm press on a prompt.
pub async fn confirm(
    state: &AppState,
    ctx: &Context,
    interaction: &ComponentInteraction,
) -> Result<(), AppError> {
    let presser =
        requester_from_member(state, interaction.user.id, interaction.member.as_ref());

    interaction.defer(ctx).await?;

    let outcome = state
        .mod_updates()
        .confirm(interaction.message.id.get(), &presser)
        .await?;

    finish_prompt(ctx, interaction.channel_id, interaction.message.id, &outcome).await
}

/// Handles an Edit press by opening the edit form prefilled with the proposal.
pub async fn edit(
    state: &AppState,
    ctx: &Context,
    interaction: &ComponentInteraction,
) -> Result<(), AppError> {
    let presser =
        requester_from_member(state, interaction.user.id, interaction.member.as_ref());

    let update = state
        .mod_updates()
        .edit(interaction.message.id.get(), &presser)
        .await?;

    interaction
        .create_response(ctx, CreateInteractionResponse::Modal(edit_modal(&update)))
        .await?;

    Ok(())
}

/// Handles a submitted edit form by committing the entered values.
pub async fn submit_edit(
    state: &AppState,
    ctx: &Context,
    interaction: &ModalInteraction,
    prompt_id: u64,
) -> Result<(), AppError> {
    let submitter =
        requester_from_member(state, interaction.user.id, interaction.member.as_ref());
    let patch = patch_from_form(&interaction.data.components);

    interaction.defer(ctx).await?;

    let outcome = state
        .mod_updates()
        .commit_edited(prompt_id, &submitter, &patch)
        .await?;

    finish_prompt(
        ctx,
        interaction.channel_id,
        MessageId::new(prompt_id),
        &outcome,
    )
    .await
}

async fn finish_prompt(
    ctx: &Context,
    channel_id: ChannelId,
    prompt_id: MessageId,
    outcome: &CommitOutcome,
) -> Result<(), AppError> {
    channel_id
        .edit_message(
            ctx,
            prompt_id,
            EditMessage::new()
                .content(format!("pushed! {} (`{}`)", outcome.message, outcome.revision))
                .components(vec![]),
        )
        .await?;

    Ok(())
}

async fn requester_from_message(
    state: &AppState,
    ctx: &Context,
    msg: &Message,
) -> Result<Requester, AppError> {
    let guild_id = msg
        .guild_id
        .ok_or_else(|| AppError::BadRequest("updates can only be run in a server".to_string()))?;
    let member = msg.member(ctx).await?;

    let is_administrator = ctx
        .cache
        .guild(guild_id)
        .map(|guild| guild.member_permissions(&member).administrator())
        .unwrap_or(false);

    Ok(Requester {
        user_id: member.user.id.get(),
        is_maintainer: member
            .roles
            .contains(&RoleId::new(state.maintainer_role_id)),
        is_administrator,
    })
}

/// Builds the requester for an interaction. Interactions outside a guild carry no
/// member and are treated as coming from a user without roles.
fn requester_from_member(
    state: &AppState,
    user_id: UserId,
    member: Option<&Member>,
) -> Requester {
    Requester {
        user_id: user_id.get(),
        is_maintainer: member.is_some_and(|member| {
            member
                .roles
                .contains(&RoleId::new(state.maintainer_role_id))
        }),
        is_administrator: member
            .and_then(|member| member.permissions)
            .is_some_and(|permissions| permissions.administrator()),
    }
}

fn display_id(forge_id: Option<&str>) -> &str {
    forge_id.unwrap_or("unknown mod")
}

fn summary_content(patch: &ManifestPatch) -> String {
    format!(
        concat!(
            "okay, ready to push out {}:\n",
            "url: `{}`\nfilename: `{}`\nhash: `{}`\n",
            "nothing will happen until you press a button"
        ),
        display_id(patch.forge_id.as_deref()),
        patch.url.as_deref().unwrap_or_default(),
        patch.file.as_deref().unwrap_or_default(),
        patch.hash.as_deref().unwrap_or_default(),
    )
}

/// Confirm needs a resolved id to match on; Edit can retarget the entry so it is
/// only offered to unrestricted requesters.
fn prompt_buttons(patch: &ManifestPatch, authorization: &Authorization) -> Vec<CreateButton> {
    let mut buttons = Vec::new();

    if patch.forge_id.is_some() {
        buttons.push(
            CreateButton::new(CONFIRM_MOD_UPDATE)
                .label("Confirm")
                .style(ButtonStyle::Primary),
        );
    }
    if authorization.restriction().is_none() {
        buttons.push(
            CreateButton::new(EDIT_MOD_UPDATE)
                .label("Edit")
                .style(ButtonStyle::Secondary),
        );
    }

    buttons
}

fn edit_modal(update: &PendingUpdate) -> CreateModal {
    let patch = &update.patch;
    let values = [
        &patch.forge_id,
        &patch.id,
        &patch.url,
        &patch.file,
        &patch.hash,
    ];

    let rows = FORM_FIELDS
        .into_iter()
        .zip(values)
        .map(|(field, value)| {
            let mut input =
                CreateInputText::new(InputTextStyle::Short, field, field).required(false);
            if let Some(value) = value {
                input = input.value(value.clone());
            }
            CreateActionRow::InputText(input)
        })
        .collect();

    CreateModal::new(edit_modal_id(update.prompt_id), "Edit update").components(rows)
}

/// Reads the submitted edit form back into a patch. Blank fields are left unset.
fn patch_from_form(rows: &[ActionRow]) -> ManifestPatch {
    let mut patch = ManifestPatch::default();

    for component in rows.iter().flat_map(|row| &row.components) {
        let ActionRowComponent::InputText(input) = component else {
            continue;
        };
        let value = input
            .value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        match input.custom_id.as_str() {
            "forge_id" => patch.forge_id = value,
            "id" => patch.id = value,
            "url" => patch.url = value,
            "file" => patch.file = value,
            "hash" => patch.hash = value,
            other => tracing::warn!("Ignoring unknown edit form field {}", other),
        }
    }

    patch
}
