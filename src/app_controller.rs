use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};

use crate::app_config::Config;
use crate::context_rotator::ContextRotator;
use crate::dictionary::{Dictionary, HttpDictionary};
use crate::entry_pipeline::{EntryForm, EntryPipeline};
use crate::errors::AppError;
use crate::identity::{Identity, ProfileIdentity, require_user};
use crate::review::{ReviewOutcome, ReviewSession};
use crate::store::{SqliteVocabStore, VocabStore};
use crate::translator::{GeminiTranslator, Translator};

// @module: Application controller wiring capabilities to CLI commands

/// Main application controller for the vocabulary trainer
pub struct Controller {
    identity: Arc<dyn Identity>,
    store: Arc<dyn VocabStore>,
    translator: Arc<dyn Translator>,
    dictionary: Arc<dyn Dictionary>,
}

/// Inputs for the `add` command
#[derive(Debug, Clone)]
pub struct AddRequest {
    /// The English sentence
    pub sentence: String,
    /// The target word or phrase
    pub word: String,
    /// Skip the dictionary probe and pronunciation metadata
    pub phrase_mode: bool,
    /// Hand-edited replacement for the generated word meaning
    pub word_meaning: Option<String>,
    /// Hand-edited replacement for the generated sentence translation
    pub context_meaning: Option<String>,
    /// Show the draft without saving it
    pub dry_run: bool,
}

impl Controller {
    /// Create a controller with production capabilities from configuration
    pub fn with_config(config: &Config) -> Result<Self> {
        let store = match &config.database_path {
            Some(path) => SqliteVocabStore::open(path)?,
            None => SqliteVocabStore::open_default()?,
        };

        Ok(Self {
            identity: Arc::new(ProfileIdentity::new(config.user.clone())),
            store: Arc::new(store),
            translator: Arc::new(GeminiTranslator::new(&config.translation)),
            dictionary: Arc::new(HttpDictionary::new(&config.dictionary)),
        })
    }

    /// Create a controller over explicit capabilities (used by tests)
    pub fn with_capabilities(
        identity: Arc<dyn Identity>,
        store: Arc<dyn VocabStore>,
        translator: Arc<dyn Translator>,
        dictionary: Arc<dyn Dictionary>,
    ) -> Self {
        Self {
            identity,
            store,
            translator,
            dictionary,
        }
    }

    fn pipeline(&self) -> EntryPipeline {
        EntryPipeline::new(
            Arc::clone(&self.dictionary),
            Arc::clone(&self.translator),
            Arc::clone(&self.store),
            Arc::clone(&self.identity),
        )
    }

    /// Translate and save one vocabulary entry
    pub async fn run_add(&self, request: AddRequest) -> Result<()> {
        let pipeline = self.pipeline();
        let mut form = EntryForm {
            sentence: request.sentence,
            word: request.word,
            phrase_mode: request.phrase_mode,
            ..EntryForm::default()
        };

        if let Err(err) = form.translate(&pipeline).await {
            error!("Entry submission failed: {}", err);
            println!("{}", user_message(&err));
            return Ok(());
        }

        // The learner may hand-edit the generated meanings before saving.
        if let Some(word_meaning) = request.word_meaning {
            form.word_meaning = word_meaning;
        }
        if let Some(context_meaning) = request.context_meaning {
            form.context_meaning = context_meaning;
        }

        println!("Từ vựng:       {}", form.word.trim());
        println!("Nghĩa của từ:  {}", form.word_meaning);
        println!("Câu:           {}", form.sentence);
        println!("Nghĩa của câu: {}", form.context_meaning);
        if !form.phonetic.is_empty() {
            println!("Phiên âm:      {}  ({})", form.phonetic, form.audio);
        }

        if request.dry_run {
            return Ok(());
        }

        match form.save(&pipeline).await {
            Ok(record) => {
                println!("Đã lưu từ vựng! (id: {})", record.id);
                Ok(())
            }
            Err(err) => {
                error!("Entry persist failed: {}", err);
                println!("{}", user_message(&err));
                Ok(())
            }
        }
    }

    /// Run an interactive review session over stdin/stdout
    pub async fn run_review(&self) -> Result<()> {
        let mut session =
            match ReviewSession::start(self.identity.as_ref(), Arc::clone(&self.store)).await {
                Ok(session) => session,
                Err(err) => {
                    error!("Review start failed: {}", err);
                    println!("{}", user_message(&err));
                    return Ok(());
                }
            };

        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();

        while let Some(cloze) = session.cloze() {
            println!();
            println!("Điểm của bạn: {}", session.session_score());
            println!("{}", cloze);
            print!("Chọn từ đúng: ");
            std::io::stdout().flush()?;

            let Some(answer) = lines.next().transpose()? else {
                // stdin closed; stop the walkthrough early
                break;
            };

            match session.submit(&answer).await {
                Ok(Some(ReviewOutcome::Correct { session_score, .. })) => {
                    println!("Chính xác! Điểm của bạn: {}", session_score);
                }
                Ok(Some(ReviewOutcome::Incorrect { correct_word })) => {
                    println!("Sai rồi! Từ đúng là: {}", correct_word);
                }
                Ok(None) => break,
                Err(err) => {
                    error!("Review answer failed: {}", err);
                    println!("{}", user_message(&err));
                }
            }
        }

        println!();
        println!(
            "Bạn đã hoàn thành ôn tập từ vựng! Điểm của bạn: {}",
            session.session_score()
        );
        Ok(())
    }

    /// Print the profile page: every entry plus the total score
    pub async fn run_profile(&self) -> Result<()> {
        let user_id = match require_user(self.identity.as_ref()) {
            Ok(user_id) => user_id,
            Err(err) => {
                println!("{}", user_message(&err));
                return Ok(());
            }
        };

        let mut records = match self.store.list_all(&user_id).await {
            Ok(records) => records,
            Err(err) => {
                let err = AppError::load(err);
                error!("Profile load failed: {}", err);
                println!("{}", user_message(&err));
                return Ok(());
            }
        };
        let score = match self.store.get_score(&user_id).await {
            Ok(score) => score,
            Err(err) => {
                let err = AppError::load(err);
                error!("Score load failed: {}", err);
                println!("{}", user_message(&err));
                return Ok(());
            }
        };

        records.sort_by_key(|record| record.word.to_lowercase());

        println!("Trang Cá Nhân — {}", user_id);
        println!("Tổng điểm của bạn: {}", score);
        println!();
        for record in &records {
            let flag = if record.in_context_list { "[x]" } else { "[ ]" };
            if record.phonetic.is_empty() {
                println!("{} {}: {}", flag, record.word, record.word_meaning);
            } else {
                println!(
                    "{} {} {}: {}",
                    flag, record.word, record.phonetic, record.word_meaning
                );
            }
            println!("      {}", record.context);
            println!("      {}", record.context_meaning);
            println!("      id: {}", record.id);
        }
        info!("Listed {} records for {}", records.len(), user_id);
        Ok(())
    }

    /// Set or clear a record's rotation flag
    pub async fn run_flag(&self, record_id: &str, flagged: bool) -> Result<()> {
        let user_id = match require_user(self.identity.as_ref()) {
            Ok(user_id) => user_id,
            Err(err) => {
                println!("{}", user_message(&err));
                return Ok(());
            }
        };

        match self
            .store
            .update_context_flag(&user_id, record_id, flagged)
            .await
        {
            Ok(()) => {
                println!(
                    "{} danh sách đổi context: {}",
                    if flagged { "Đã thêm vào" } else { "Đã xóa khỏi" },
                    record_id
                );
                Ok(())
            }
            Err(err) => {
                let err = AppError::persist(err);
                error!("Flag update failed: {}", err);
                println!("{}", user_message(&err));
                Ok(())
            }
        }
    }

    /// Refresh contexts on all flagged records, with a progress bar
    pub async fn run_rotate(&self) -> Result<()> {
        let user_id = match require_user(self.identity.as_ref()) {
            Ok(user_id) => user_id,
            Err(err) => {
                println!("{}", user_message(&err));
                return Ok(());
            }
        };

        let rotator = ContextRotator::new(Arc::clone(&self.translator), Arc::clone(&self.store));

        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let result = rotator
            .rotate_with_progress(&user_id, |done, total| {
                bar.set_length(total as u64);
                bar.set_position(done as u64);
            })
            .await;
        bar.finish_and_clear();

        match result {
            Ok(report) => {
                println!("Đổi context thành công! ({} từ vựng)", report.rotated);
                Ok(())
            }
            Err(err) => {
                error!("Context rotation failed: {}", err);
                println!("{}", user_message(&err));
                Ok(())
            }
        }
    }
}

/// Map a core error onto the Vietnamese message shown to the learner
pub fn user_message(err: &AppError) -> String {
    match err {
        AppError::NotAuthenticated => "Bạn cần đăng nhập để sử dụng tính năng này!".to_string(),
        AppError::WordNotInSentence { .. } => "Từ vựng không tồn tại trong câu!".to_string(),
        AppError::InvalidSpelling { word } => {
            format!("Từ \"{}\" không đúng chính tả!", word)
        }
        AppError::Translation(_) => "Có lỗi xảy ra khi dịch. Vui lòng thử lại!".to_string(),
        AppError::Persist(_) => "Có lỗi xảy ra khi lưu. Vui lòng thử lại!".to_string(),
        AppError::Load(_) => "Có lỗi xảy ra khi tải từ vựng. Vui lòng thử lại!".to_string(),
        AppError::IncompleteDraft(_) => {
            "Vui lòng điền đầy đủ thông tin trước khi lưu!".to_string()
        }
        AppError::RotationFailed { .. } => {
            "Có lỗi xảy ra khi đổi context. Vui lòng thử lại!".to_string()
        }
    }
}
