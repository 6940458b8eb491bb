//! Shared helpers for command handlers.

use std::future::Future;

use paydeck_core::{CoreError, ListParams, Page, SortDirection};

use crate::cli::{GlobalOpts, ListOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Build `ListParams` from the shared list flags.
pub fn list_params(opts: &ListOpts) -> ListParams {
    let mut params = ListParams::new(opts.page_size)
        .page(opts.page)
        .created_between(opts.from, opts.to);

    if let Some(ref term) = opts.search {
        params = params.search(term.clone());
    }

    if let Some(ref sort) = opts.sort {
        let (field, direction) = match sort.strip_prefix('-') {
            Some(field) => (field, SortDirection::Descending),
            None => (sort.as_str(), SortDirection::Ascending),
        };
        params = params.ordering(field, direction);
    }

    params
}

/// Fetch one page, or walk every page when `--all` was passed.
pub async fn fetch_page<T, F, Fut>(opts: &ListOpts, fetch: F) -> Result<Page<T>, CliError>
where
    F: Fn(ListParams) -> Fut,
    Fut: Future<Output = Result<Page<T>, CoreError>>,
{
    let params = list_params(opts);

    if !opts.all {
        return Ok(fetch(params).await?);
    }

    let page_size = usize::try_from(opts.page_size).unwrap_or(usize::MAX);
    let mut all = Vec::new();
    let mut page_no: u32 = 1;
    loop {
        let page = fetch(list_params(opts).page(page_no)).await?;
        let received = page.results.len();
        let count = page.count;
        all.extend(page.results);
        if received < page_size || u64::try_from(all.len()).unwrap_or(u64::MAX) >= count {
            break;
        }
        page_no += 1;
    }

    let count = u64::try_from(all.len()).unwrap_or(u64::MAX);
    Ok(Page {
        count,
        next: None,
        previous: None,
        results: all,
    })
}

/// Print the pagination footer under a table, when it adds information.
pub fn print_footer<T>(page: &Page<T>, opts: &ListOpts, global: &GlobalOpts) {
    if global.quiet || opts.all || !matches!(global.output, OutputFormat::Table) {
        return;
    }
    let current = opts.page.max(1);
    let page_size = u64::from(opts.page_size.max(1));
    let total_pages = u32::try_from(page.count.div_ceil(page_size).max(1)).unwrap_or(u32::MAX);
    let first = u64::from(current - 1) * page_size + 1;
    let last = (u64::from(current) * page_size).min(page.count);
    if page.count > 0 {
        eprintln!(
            "{}",
            output::page_footer(first, last, page.count, current, total_pages)
        );
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
