//! 内联标记解析器
//!
//! 将操作员输入的文本拆分为有序的语音/音效片段：
//! 1. 第一遍扫描音色指令（`alice:`），划分音色作用区间
//! 2. 第二遍在每个区间内扫描音效引用（`[sfx:boo]`）

use once_cell::sync::Lazy;
use regex::Regex;

use super::segment::{Segment, VoiceDirective};
use crate::domain::registry::SoundEffectRegistry;

/// 单次解析允许的最大音效数
pub const DEFAULT_MAX_SOUND_EFFECTS: usize = 10;

// 指令前必须是输入开头或空白；空白会被匹配消耗，因此紧邻的第二个指令不生效
static VOICE_DIRECTIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|\s)([A-Za-z0-9_]+):\s*").expect("voice directive pattern is valid")
});
static SOUND_EFFECT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[[Ss][Ff][Xx]:([A-Za-z0-9_]+)\]").expect("sound effect pattern is valid")
});

/// 解析配置
#[derive(Debug, Clone)]
pub struct MarkupConfig {
    /// 单次解析最多识别的音效数，超出部分按普通文本朗读
    pub max_sound_effects: usize,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            max_sound_effects: DEFAULT_MAX_SOUND_EFFECTS,
        }
    }
}

/// 扫描所有音色指令（从左到右，不重叠）
pub fn scan_directives(input: &str) -> Vec<VoiceDirective> {
    VOICE_DIRECTIVE_RE
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let lead = caps.get(1).map_or(0, |m| m.len());
            let name = caps.get(2)?;
            Some(VoiceDirective {
                voice: name.as_str().to_ascii_lowercase(),
                start: whole.start() + lead,
                applies_from: whole.end(),
            })
        })
        .collect()
}

/// 检查文本是否包含音效引用（无论是否已注册）
pub fn has_sound_effect_refs(input: &str) -> bool {
    SOUND_EFFECT_RE.is_match(input)
}

/// 片段收集器，跨区间累计音效数量
struct SegmentEmitter<'a> {
    registry: &'a SoundEffectRegistry,
    max_sound_effects: usize,
    sound_effects: usize,
    segments: Vec<Segment>,
}

impl<'a> SegmentEmitter<'a> {
    fn new(registry: &'a SoundEffectRegistry, max_sound_effects: usize) -> Self {
        Self {
            registry,
            max_sound_effects,
            sound_effects: 0,
            segments: Vec::new(),
        }
    }

    /// 空白片段直接丢弃
    fn push_speech(&mut self, chunk: &str, voice: Option<&str>) {
        let trimmed = chunk.trim();
        if !trimmed.is_empty() {
            self.segments.push(Segment::speech(trimmed, voice));
        }
    }

    /// 处理一个音色作用区间
    fn push_span(&mut self, span: &str, voice: Option<&str>) {
        if span.is_empty() {
            return;
        }

        let mut pos = 0;
        for caps in SOUND_EFFECT_RE.captures_iter(span) {
            let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            self.push_speech(&span[pos..whole.start()], voice);

            let key = token.as_str().to_ascii_lowercase();
            if self.registry.contains(&key) && self.sound_effects < self.max_sound_effects {
                self.segments.push(Segment::SoundEffect {
                    name: token.as_str().to_string(),
                    registry_key: key,
                });
                self.sound_effects += 1;
            } else {
                // 未注册或超出上限：原样朗读
                self.segments.push(Segment::speech(whole.as_str(), voice));
            }

            pos = whole.end();
        }

        self.push_speech(&span[pos..], voice);
    }

    fn finish(self) -> Vec<Segment> {
        self.segments
    }
}

/// 解析内联标记
///
/// - 第一个指令之前的文本使用 `fallback_voice`
/// - 没有任何指令和音效引用时，原文（不去空白）作为单个语音片段返回
/// - 解析结果为空时同样回退为单个语音片段
pub fn parse_segments_with(
    input: &str,
    fallback_voice: Option<&str>,
    registry: &SoundEffectRegistry,
    config: &MarkupConfig,
) -> Vec<Segment> {
    let fallback_voice = fallback_voice.filter(|v| !v.is_empty());
    let directives = scan_directives(input);

    if directives.is_empty() && !has_sound_effect_refs(input) {
        return vec![Segment::speech(input, fallback_voice)];
    }

    let mut emitter = SegmentEmitter::new(registry, config.max_sound_effects);
    let mut current_voice = fallback_voice.map(str::to_string);
    let mut cursor = 0;

    for directive in &directives {
        if directive.start > cursor {
            emitter.push_span(&input[cursor..directive.start], current_voice.as_deref());
        }
        current_voice = Some(directive.voice.clone());
        cursor = directive.applies_from;
    }
    emitter.push_span(&input[cursor..], current_voice.as_deref());

    let segments = emitter.finish();
    if segments.is_empty() {
        return vec![Segment::speech(input, fallback_voice)];
    }
    segments
}

/// 使用默认配置解析（便捷方法）
pub fn parse_segments(
    input: &str,
    fallback_voice: Option<&str>,
    registry: &SoundEffectRegistry,
) -> Vec<Segment> {
    parse_segments_with(input, fallback_voice, registry, &MarkupConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(keys: &[&str]) -> SoundEffectRegistry {
        SoundEffectRegistry::from_entries(
            keys.iter()
                .map(|k| (k.to_string(), format!("/sounds/{}.mp3", k))),
        )
    }

    fn sfx(name: &str) -> Segment {
        Segment::sound_effect(name)
    }

    #[test]
    fn test_plain_text_returned_verbatim() {
        let reg = registry(&["boo"]);
        let segments = parse_segments("  hello world  ", Some("amy"), &reg);
        assert_eq!(segments, vec![Segment::speech("  hello world  ", Some("amy"))]);
    }

    #[test]
    fn test_empty_fallback_voice_is_none() {
        let reg = registry(&[]);
        let segments = parse_segments("hello", Some(""), &reg);
        assert_eq!(segments, vec![Segment::speech("hello", None)]);
    }

    #[test]
    fn test_directive_and_effect() {
        let reg = registry(&["boo"]);
        let segments = parse_segments("alice: hello [sfx:boo] world", None, &reg);
        assert_eq!(
            segments,
            vec![
                Segment::speech("hello", Some("alice")),
                sfx("boo"),
                Segment::speech("world", Some("alice")),
            ]
        );
    }

    #[test]
    fn test_unknown_effect_kept_as_speech() {
        let reg = registry(&["boo"]);
        let segments = parse_segments("say [sfx:unknown] now", Some("amy"), &reg);
        assert_eq!(
            segments,
            vec![
                Segment::speech("say", Some("amy")),
                Segment::speech("[sfx:unknown]", Some("amy")),
                Segment::speech("now", Some("amy")),
            ]
        );
    }

    #[test]
    fn test_effect_cap_is_ten() {
        let reg = registry(&["x"]);
        let input = vec!["[sfx:x]"; 11].join(" ");
        let segments = parse_segments(&input, None, &reg);

        assert_eq!(segments.len(), 11);
        assert_eq!(segments.iter().filter(|s| s.is_sound_effect()).count(), 10);
        assert_eq!(segments[10], Segment::speech("[sfx:x]", None));
    }

    #[test]
    fn test_effect_cap_is_global_across_spans() {
        let reg = registry(&["x"]);
        let input = format!(
            "alice: {} bob: {}",
            vec!["[sfx:x]"; 6].join(" "),
            vec!["[sfx:x]"; 6].join(" ")
        );
        let segments = parse_segments(&input, None, &reg);

        assert_eq!(segments.iter().filter(|s| s.is_sound_effect()).count(), 10);
        let literal: Vec<_> = segments.iter().filter(|s| s.is_speech()).collect();
        assert_eq!(literal.len(), 2);
        assert!(literal.iter().all(|s| s.voice() == Some("bob")));
    }

    #[test]
    fn test_custom_effect_cap() {
        let reg = registry(&["x"]);
        let config = MarkupConfig { max_sound_effects: 1 };
        let segments = parse_segments_with("[sfx:x] [sfx:x]", None, &reg, &config);
        assert_eq!(segments, vec![sfx("x"), Segment::speech("[sfx:x]", None)]);
    }

    #[test]
    fn test_later_directive_overrides() {
        let reg = registry(&[]);
        let segments = parse_segments("intro alice: hi there bob: bye", Some("amy"), &reg);
        assert_eq!(
            segments,
            vec![
                Segment::speech("intro", Some("amy")),
                Segment::speech("hi there", Some("alice")),
                Segment::speech("bye", Some("bob")),
            ]
        );
    }

    #[test]
    fn test_directive_and_effect_case_insensitive() {
        let reg = registry(&["boo"]);
        let segments = parse_segments("ALICE: hey [SFX:Boo]", None, &reg);
        assert_eq!(
            segments,
            vec![
                Segment::speech("hey", Some("alice")),
                Segment::SoundEffect {
                    name: "Boo".to_string(),
                    registry_key: "boo".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_directive_only_collapses_to_raw_input() {
        let reg = registry(&[]);
        let segments = parse_segments("alice:", Some("amy"), &reg);
        assert_eq!(segments, vec![Segment::speech("alice:", Some("amy"))]);
    }

    #[test]
    fn test_adjacent_directive_needs_unconsumed_whitespace() {
        let reg = registry(&[]);
        let segments = parse_segments("alice: bob: hi", None, &reg);
        assert_eq!(segments, vec![Segment::speech("bob: hi", Some("alice"))]);
    }

    #[test]
    fn test_effect_marker_is_not_a_directive() {
        let reg = registry(&["boo"]);
        let segments = parse_segments("[sfx:boo]", Some("amy"), &reg);
        assert_eq!(segments, vec![sfx("boo")]);
    }

    #[test]
    fn test_effects_between_voices_keep_order() {
        let reg = registry(&["boo", "clap"]);
        let segments = parse_segments("alice: hi [sfx:boo] bob: [sfx:clap] yo", None, &reg);
        assert_eq!(
            segments,
            vec![
                Segment::speech("hi", Some("alice")),
                sfx("boo"),
                sfx("clap"),
                Segment::speech("yo", Some("bob")),
            ]
        );
    }

    #[test]
    fn test_scan_directives_offsets() {
        let directives = scan_directives("hi Alice:  there");
        assert_eq!(
            directives,
            vec![VoiceDirective {
                voice: "alice".to_string(),
                start: 3,
                applies_from: 11,
            }]
        );
    }
}
