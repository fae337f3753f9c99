//! 续写合并
//!
//! 纯函数，不做 I/O；调用方负责把结果写回归档

use std::collections::HashSet;

use super::{ArchivedStory, GeneratedStory, GlossaryItem, StoryPart};

/// 合并续写结果
///
/// 合并规则:
/// 1. 新片段按生成顺序追加到已有片段之后
/// 2. 新词条仅当 word 未出现过时追加（精确匹配），先出现者优先
/// 3. id / title / params / created_at 保持不变
///
/// 续写结果没有片段时原样返回 `existing`，调用方应跳过写回
pub fn merge_continuation(existing: &ArchivedStory, fresh: &GeneratedStory) -> ArchivedStory {
    if fresh.story_parts.is_empty() {
        return existing.clone();
    }

    let story_parts: Vec<StoryPart> = existing
        .story_parts()
        .iter()
        .chain(fresh.story_parts.iter())
        .cloned()
        .collect();
    let glossary = merge_glossary(existing.glossary(), &fresh.glossary);

    existing.with_content(story_parts, glossary)
}

/// 按 word 去重合并词汇表
///
/// 已有条目原样保留，不会被修改或删除
pub fn merge_glossary(existing: &[GlossaryItem], incoming: &[GlossaryItem]) -> Vec<GlossaryItem> {
    let mut seen: HashSet<&str> = existing.iter().map(|item| item.word.as_str()).collect();
    let mut merged = existing.to_vec();

    for item in incoming {
        if seen.insert(item.word.as_str()) {
            merged.push(item.clone());
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::story::StoryParams;

    fn params() -> StoryParams {
        StoryParams {
            prompt: "A dog who finds a new home".to_string(),
            genre: "Adventure".to_string(),
            source_language: "English".to_string(),
            target_language: "Spanish".to_string(),
            level: "A1".to_string(),
        }
    }

    fn story_a() -> ArchivedStory {
        ArchivedStory::new(
            GeneratedStory {
                title: "La casa".to_string(),
                story_parts: vec![StoryPart::new("Ch1", "Hay una casa.", "There is a house.")],
                glossary: vec![GlossaryItem::new("casa", "house")],
            },
            params(),
        )
    }

    #[test]
    fn test_merge_appends_parts_and_dedups_glossary() {
        let existing = story_a();
        let fresh = GeneratedStory {
            title: "ignored".to_string(),
            story_parts: vec![StoryPart::new("Ch2", "Hay un perro.", "There is a dog.")],
            glossary: vec![
                GlossaryItem::new("casa", "house (dup)"),
                GlossaryItem::new("perro", "dog"),
            ],
        };

        let merged = merge_continuation(&existing, &fresh);

        assert_eq!(
            merged.glossary(),
            &[GlossaryItem::new("casa", "house"), GlossaryItem::new("perro", "dog")]
        );
        let titles: Vec<&str> = merged.story_parts().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Ch1", "Ch2"]);
    }

    #[test]
    fn test_merge_preserves_identity_fields() {
        let existing = story_a();
        let fresh = GeneratedStory {
            title: "Otro título".to_string(),
            story_parts: vec![StoryPart::new("Ch2", "...", "...")],
            glossary: vec![],
        };

        let merged = merge_continuation(&existing, &fresh);

        assert_eq!(merged.id(), existing.id());
        assert_eq!(merged.title(), existing.title());
        assert_eq!(merged.params(), existing.params());
        assert_eq!(merged.created_at(), existing.created_at());
    }

    #[test]
    fn test_merge_is_append_only() {
        let existing = story_a();
        let fresh = GeneratedStory {
            title: String::new(),
            story_parts: vec![
                StoryPart::new("Ch2", "a", "a"),
                StoryPart::new("Ch3", "b", "b"),
            ],
            glossary: vec![],
        };

        let merged = merge_continuation(&existing, &fresh);

        assert_eq!(merged.part_count(), existing.part_count() + fresh.story_parts.len());
        assert_eq!(&merged.story_parts()[..existing.part_count()], existing.story_parts());
        assert_eq!(&merged.story_parts()[existing.part_count()..], &fresh.story_parts[..]);
    }

    #[test]
    fn test_empty_continuation_is_noop() {
        let existing = story_a();
        let fresh = GeneratedStory {
            title: "x".to_string(),
            story_parts: vec![],
            glossary: vec![GlossaryItem::new("perro", "dog")],
        };

        let merged = merge_continuation(&existing, &fresh);
        assert_eq!(merged, existing);
    }

    #[test]
    fn test_glossary_dedup_within_incoming() {
        let merged = merge_glossary(
            &[],
            &[
                GlossaryItem::new("gato", "cat"),
                GlossaryItem::new("gato", "cat (again)"),
                GlossaryItem::new("sol", "sun"),
            ],
        );

        assert_eq!(
            merged,
            vec![GlossaryItem::new("gato", "cat"), GlossaryItem::new("sol", "sun")]
        );
    }

    #[test]
    fn test_glossary_dedup_is_case_sensitive() {
        let merged = merge_glossary(
            &[GlossaryItem::new("Casa", "house")],
            &[GlossaryItem::new("casa", "house")],
        );

        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_glossary_merge_keeps_every_existing_word_once() {
        let existing = vec![
            GlossaryItem::new("uno", "one"),
            GlossaryItem::new("dos", "two"),
        ];
        let incoming = vec![
            GlossaryItem::new("dos", "2"),
            GlossaryItem::new("tres", "three"),
            GlossaryItem::new("uno", "1"),
        ];

        let merged = merge_glossary(&existing, &incoming);

        for item in &existing {
            assert_eq!(merged.iter().filter(|m| m.word == item.word).count(), 1);
            assert!(merged.contains(item));
        }
        assert_eq!(merged.len(), 3);
    }
}
