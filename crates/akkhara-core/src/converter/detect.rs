use std::ops::RangeInclusive;

use crate::script::ScriptTag;

/// Hub codes that [`ScriptTag::of_char`] leaves neutral.
const HUB_LATIN1: RangeInclusive<u32> = 0xA0..=0xBF;

/// Most frequent script among the chars of `text`, by Unicode block.
/// Ties go to the script seen first. `None` when no char belongs to a
/// script.
pub fn detect_script(text: &str) -> Option<ScriptTag> {
    let mut counts = [0usize; ScriptTag::COUNT];
    let mut first_seen = [usize::MAX; ScriptTag::COUNT];
    for (pos, script) in text.chars().filter_map(ScriptTag::of_char).enumerate() {
        let i = script.index();
        counts[i] += 1;
        first_seen[i] = first_seen[i].min(pos);
    }
    ScriptTag::ALL
        .into_iter()
        .filter(|s| counts[s.index()] > 0)
        .max_by(|a, b| {
            counts[a.index()]
                .cmp(&counts[b.index()])
                .then(first_seen[b.index()].cmp(&first_seen[a.index()]))
        })
}

/// Split `text` into maximal runs of one script. Chars without a script
/// join the run they sit in; leading ones join the first scripted run.
/// Latin-1 hub codes right before a hub run belong to that run, and any
/// other neutral chars leading into a hub run stay a `None` run.
pub(crate) fn script_runs(text: &str) -> Vec<(Option<ScriptTag>, &str)> {
    let mut runs: Vec<(Option<ScriptTag>, &str)> = Vec::new();
    let mut start = 0;
    let mut current: Option<ScriptTag> = None;

    for (pos, ch) in text.char_indices() {
        let Some(script) = ScriptTag::of_char(ch) else {
            continue;
        };
        match current {
            None => {
                if script == ScriptTag::Hub {
                    start = hub_tail_start(&text[..pos]);
                    if start > 0 {
                        runs.push((None, &text[..start]));
                    }
                }
                current = Some(script);
            }
            Some(cur) if cur != script => {
                let split = if script == ScriptTag::Hub {
                    start + hub_tail_start(&text[start..pos])
                } else {
                    pos
                };
                runs.push((current, &text[start..split]));
                start = split;
                current = Some(script);
            }
            Some(_) => {}
        }
    }
    if start < text.len() {
        runs.push((current, &text[start..]));
    }
    runs
}

fn hub_tail_start(run: &str) -> usize {
    run.char_indices()
        .rev()
        .take_while(|(_, c)| HUB_LATIN1.contains(&(*c as u32)))
        .last()
        .map_or(run.len(), |(i, _)| i)
}
