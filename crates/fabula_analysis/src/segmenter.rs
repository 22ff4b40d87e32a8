//! Chapter and scene segmentation.
//!
//! Splits a raw document into chapters by heading detection, infers a
//! narrating viewpoint per chapter, and asks the model to partition each
//! chapter into scenes. Every model-dependent step has a deterministic
//! fallback: an undetectable narrator is recorded as unknown, and a chapter
//! whose scene payload cannot be parsed becomes exactly one scene.

use crate::{char_prefix, extraction::parse_payload};
use fabula_core::{Chapter, Document, Scene};
use fabula_error::FabulaResult;
use fabula_models::Gateway;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

/// Heading patterns tried in priority order. The first pattern that yields
/// at least one match anywhere in the text is used exclusively.
const CHAPTER_PATTERNS: [&str; 6] = [
    r"Chapter \d+",
    r"CHAPTER \d+",
    r"Chapter [IVX]+",
    r"CHAPTER [IVX]+",
    r"\n\d+\n",
    r"\n[IVX]+\n",
];

/// Chapters shorter than this are dropped as heading artifacts.
const MIN_CHAPTER_LEN: usize = 100;

/// Prefix of chapter text sent for narrator identification.
const NARRATOR_SAMPLE_CHARS: usize = 2000;

/// Prefix of chapter text sent for scene segmentation.
const SCENE_SAMPLE_CHARS: usize = 6000;

/// Narrator identification payload.
#[derive(Debug, Deserialize)]
struct NarratorPayload {
    narrator: String,
}

/// Scene segmentation payload.
#[derive(Debug, Deserialize)]
struct ScenesPayload {
    #[serde(default)]
    scenes: Vec<SceneEntry>,
}

/// One scene listed by the model.
#[derive(Debug, Deserialize)]
struct SceneEntry {
    #[serde(default)]
    text: String,
}

/// Splits documents into chapters and scenes.
pub struct Segmenter<'a> {
    gateway: &'a Gateway,
}

impl<'a> Segmenter<'a> {
    /// Create a segmenter that calls the model through the given gateway.
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Segment a document into scenes, in chapter order then in-chapter order.
    ///
    /// Scene numbering restarts at 1 per chapter. All scenes of a chapter
    /// share the chapter's inferred narrator.
    ///
    /// # Errors
    ///
    /// Fails only when the gateway is not ready; model misbehavior degrades
    /// to fallback scenes instead.
    #[instrument(skip(self, document), fields(book_id = %document.book_id))]
    pub async fn segment(&self, document: &Document) -> FabulaResult<Vec<Scene>> {
        let chapters = self.segment_chapters(document);
        info!(chapters = chapters.len(), "Segmenting chapters into scenes");

        let mut scenes = Vec::new();
        for chapter in &chapters {
            let narrator = self.identify_narrator(&chapter.text).await?;
            let chapter_scenes = self
                .segment_chapter_scenes(document, chapter, narrator)
                .await?;
            scenes.extend(chapter_scenes);
        }

        Ok(scenes)
    }

    /// Split raw document text into chapters by heading detection.
    ///
    /// Chapters shorter than the minimum length are dropped as noise,
    /// except the single-chapter fallback which is always kept.
    pub fn segment_chapters(&self, document: &Document) -> Vec<Chapter> {
        for pattern in CHAPTER_PATTERNS {
            let re = Regex::new(pattern).expect("chapter patterns are valid regexes");
            let matches: Vec<_> = re.find_iter(&document.text).collect();
            if matches.is_empty() {
                continue;
            }

            debug!(pattern, headings = matches.len(), "Chapter pattern matched");

            let mut chapters = Vec::new();
            let mut chapter_num = 0;
            for (i, heading) in matches.iter().enumerate() {
                let start = heading.end();
                let end = matches
                    .get(i + 1)
                    .map(|next| next.start())
                    .unwrap_or(document.text.len());
                let body = document.text[start..end].trim();

                chapter_num += 1;
                if body.len() > MIN_CHAPTER_LEN {
                    chapters.push(Chapter::new(&document.book_id, chapter_num, body));
                } else {
                    debug!(chapter_num, len = body.len(), "Dropping short chapter");
                }
            }

            // The first pattern with any match is authoritative, even if
            // every span it produced was dropped as too short.
            if chapters.is_empty() {
                break;
            }
            return chapters;
        }

        // No usable headings: the whole document is one chapter, kept
        // regardless of length.
        vec![Chapter::new(&document.book_id, 1, document.text.clone())]
    }

    /// Infer the viewpoint character for a chapter.
    ///
    /// Parse failures never abort chapter processing; the narrator is
    /// simply recorded as unknown.
    ///
    /// # Errors
    ///
    /// Fails only when the gateway is not ready.
    pub async fn identify_narrator(&self, chapter_text: &str) -> FabulaResult<Option<String>> {
        let sample = char_prefix(chapter_text, NARRATOR_SAMPLE_CHARS);
        let prompt = narrator_prompt(sample);

        let response = self.gateway.call(&prompt).await?;
        let narrator = parse_payload::<NarratorPayload>(&response)
            .map(|payload| payload.narrator)
            .filter(|name| !name.trim().is_empty() && name != "Unknown");

        if narrator.is_none() {
            debug!("Narrator could not be determined");
        }

        Ok(narrator)
    }

    /// Ask the model to partition one chapter into scenes.
    ///
    /// On parse failure the entire (truncated) chapter becomes exactly one
    /// scene, preserving the narrator.
    async fn segment_chapter_scenes(
        &self,
        document: &Document,
        chapter: &Chapter,
        narrator: Option<String>,
    ) -> FabulaResult<Vec<Scene>> {
        let sample = char_prefix(&chapter.text, SCENE_SAMPLE_CHARS);
        let prompt = scene_prompt(chapter.chapter_num, narrator.as_deref(), sample);

        let response = self.gateway.call(&prompt).await?;

        match parse_payload::<ScenesPayload>(&response) {
            Some(payload) => {
                debug!(
                    chapter = chapter.chapter_num,
                    scenes = payload.scenes.len(),
                    "Parsed scene payload"
                );
                Ok(payload
                    .scenes
                    .into_iter()
                    .enumerate()
                    .map(|(i, entry)| {
                        Scene::new(
                            &chapter.chapter_id,
                            &document.book_id,
                            chapter.chapter_num,
                            (i + 1) as u32,
                            entry.text,
                        )
                        .with_narrator(narrator.clone())
                    })
                    .collect())
            }
            None => {
                warn!(
                    chapter = chapter.chapter_num,
                    "Scene payload unparseable, treating chapter as one scene"
                );
                // The fallback scene spans the whole (truncated) chapter,
                // so its paragraph bounds are known exactly.
                let paragraphs = count_paragraphs(sample);
                Ok(vec![Scene::new(
                    &chapter.chapter_id,
                    &document.book_id,
                    chapter.chapter_num,
                    1,
                    sample,
                )
                .with_narrator(narrator)
                .with_paragraph_bounds(0, paragraphs.saturating_sub(1))])
            }
        }
    }
}

/// Number of blank-line-separated paragraphs in a text span.
fn count_paragraphs(text: &str) -> u32 {
    text.split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .count() as u32
}

/// Prompt asking the model to identify the chapter's narrator.
fn narrator_prompt(sample: &str) -> String {
    format!(
        r#"Identify the narrator/point-of-view character in this chapter excerpt.

Look for:
- First person pronouns ("I", "my", "me")
- Character names mentioned as the speaker
- Self-identification ("My name is...")
- Perspective clues

Text:
{sample}

Return JSON:
{{
  "narrator": "character_name",
  "confidence": "high/medium/low",
  "evidence": "Brief quote showing narrator identity"
}}"#
    )
}

/// Prompt asking the model to partition a chapter into scenes.
fn scene_prompt(chapter_num: u32, narrator: Option<&str>, sample: &str) -> String {
    format!(
        r#"Analyze this story chapter and identify scene breaks within it.

Chapter {chapter_num} (Narrator: {narrator})

A scene is a continuous sequence in the same location/time. Look for:
- Location changes
- Time jumps
- Major topic shifts
- Character group changes

Text:
{sample}

Return JSON with this structure:
{{
  "scenes": [
    {{
      "scene_id": "scene_1",
      "description": "Brief description of what happens",
      "text": "The actual scene text"
    }}
  ]
}}"#,
        narrator = narrator.unwrap_or("Unknown"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::new("test_book", text)
    }

    fn offline_segmenter_chapters(text: &str) -> Vec<Chapter> {
        // segment_chapters is pure; the gateway is never touched.
        let gateway = noop_gateway();
        let segmenter = Segmenter::new(&gateway);
        segmenter.segment_chapters(&doc(text))
    }

    fn noop_gateway() -> Gateway {
        use async_trait::async_trait;
        use fabula_interface::{GenerateRequest, GenerateResponse, LanguageModel};
        use fabula_models::ProviderKind;

        struct Noop;

        #[async_trait]
        impl LanguageModel for Noop {
            async fn generate(&self, _req: &GenerateRequest) -> FabulaResult<GenerateResponse> {
                Ok(GenerateResponse::new(""))
            }

            fn provider_name(&self) -> &'static str {
                "test"
            }

            fn model_name(&self) -> &str {
                "noop"
            }
        }

        Gateway::from_backend(Box::new(Noop), ProviderKind::Ollama)
    }

    #[test]
    fn no_headings_yields_single_chapter() {
        let chapters = offline_segmenter_chapters("Just a short story without any headings.");
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].chapter_num, 1);
        assert!(chapters[0].text.contains("short story"));
    }

    #[test]
    fn chapter_headings_split_text() {
        let body_one = "It was a dark and stormy night. ".repeat(10);
        let body_two = "The next morning everything changed. ".repeat(10);
        let text = format!("Chapter 1\n{body_one}\nChapter 2\n{body_two}");
        let chapters = offline_segmenter_chapters(&text);
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].chapter_num, 1);
        assert_eq!(chapters[1].chapter_num, 2);
        assert!(chapters[0].text.contains("stormy"));
        assert!(chapters[1].text.contains("morning"));
    }

    #[test]
    fn short_chapters_are_dropped() {
        let long_body = "A chapter long enough to keep around for analysis. ".repeat(5);
        let text = format!("Chapter 1\ntiny\nChapter 2\n{long_body}");
        let chapters = offline_segmenter_chapters(&text);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].chapter_num, 2);
    }

    #[test]
    fn first_matching_pattern_wins() {
        // Both "Chapter N" and bare roman numeral lines appear; only the
        // first pattern's matches define chapter boundaries.
        let body = "Body text that is comfortably past the length floor. ".repeat(5);
        let text = format!("Chapter 1\n{body}\nIV\n{body}");
        let chapters = offline_segmenter_chapters(&text);
        assert_eq!(chapters.len(), 1);
        assert!(chapters[0].text.contains("IV"));
    }

    #[test]
    fn paragraph_count_splits_on_blank_lines() {
        assert_eq!(count_paragraphs("one\n\ntwo\n\nthree"), 3);
        assert_eq!(count_paragraphs("single paragraph"), 1);
        assert_eq!(count_paragraphs("one\n\n\n\ntwo"), 2);
    }

    #[test]
    fn chapter_ids_derive_from_book() {
        let chapters = offline_segmenter_chapters("No headings here, just prose.");
        assert_eq!(chapters[0].chapter_id, "test_book_chapter_1");
    }
}
