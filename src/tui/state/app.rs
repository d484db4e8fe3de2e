//! 应用状态
//!
//! 按键事件在这里转换为向导动作。终端绘制与事件读取在 `TuiApp` 中，
//! 这里不做任何终端 I/O，便于测试。

use crate::config::AppConfig;
use crate::export::{QuizDocument, export_to_dir};
use crate::generation::{GenerationError, GenerationJob, QuizGenerator};
use crate::quick::QuickQuiz;
use crate::quiz::{EnumOption, Question};
use crate::tui::event::TuiEvent;
use crate::tui::labels::upload_error_text;
use crate::tui::state::{
    FormItem, GenerationProgress, MenuState, QuickItem, Screen, Selectable, WizardForm,
    menu::HomeItem,
};
use crate::wizard::{
    Action, ConfigUpdate, Effect, WizardState, WizardStep, next_quantity, prev_quantity,
    read_upload,
};
use rust_i18n::t;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// 应用状态（包含 UI 状态）
#[derive(Debug)]
pub struct AppState {
    /// 当前屏幕
    pub current_screen: Screen,
    /// 首页菜单
    pub menu_state: MenuState,
    /// 向导数据
    pub wizard: WizardState,
    /// 快速出题数据
    pub quick: QuickQuiz,
    /// 表单焦点与输入（向导与快速出题共用）
    pub form: WizardForm,
    /// 进行中的生成任务
    pub progress: Option<GenerationProgress>,
    /// 运行配置
    pub config: AppConfig,
    /// 日志文件路径
    pub log_path: Option<PathBuf>,
    /// 生成服务
    generator: Arc<dyn QuizGenerator>,
}

impl AppState {
    /// 创建应用状态
    pub fn new(config: AppConfig, generator: Arc<dyn QuizGenerator>) -> Self {
        Self {
            current_screen: Screen::Home,
            menu_state: MenuState::default(),
            wizard: WizardState::new(config.uploads.clone()),
            quick: QuickQuiz::default(),
            form: WizardForm::default(),
            progress: None,
            config,
            log_path: None,
            generator,
        }
    }

    /// 处理事件，返回 true 表示退出程序
    pub fn handle_event(&mut self, event: TuiEvent) -> bool {
        match self.current_screen {
            Screen::Home => self.handle_home(event),
            Screen::Wizard => {
                self.handle_wizard(event);
                false
            }
            Screen::Quick => {
                self.handle_quick(event);
                false
            }
            Screen::Exit => self.handle_exit(event),
        }
    }

    /// 每个空闲周期调用，收取后台生成结果
    pub fn tick(&mut self) {
        let Some(progress) = self.progress.as_mut() else {
            return;
        };
        if let Some(outcome) = progress.tick() {
            self.progress = None;
            self.finish_generation(outcome);
        }
    }

    /// 回到首页并丢弃向导数据
    pub fn go_home(&mut self) {
        if let Some(progress) = self.progress.take() {
            progress.cancel();
        }
        self.current_screen = Screen::Home;
        self.menu_state = MenuState::default();
        self.wizard = WizardState::new(self.config.uploads.clone());
        self.quick = QuickQuiz::default();
        self.form.reset();
    }

    /// 处理首页事件
    fn handle_home(&mut self, event: TuiEvent) -> bool {
        match event {
            TuiEvent::Up | TuiEvent::Left | TuiEvent::BackTab => self.menu_state.prev(),
            TuiEvent::Down | TuiEvent::Right | TuiEvent::Tab => self.menu_state.next(),
            TuiEvent::Enter => match self.menu_state.selected_item() {
                HomeItem::NewQuiz => self.start_wizard(),
                HomeItem::QuickQuiz => self.start_quick(),
                HomeItem::Exit => self.current_screen = Screen::Exit,
            },
            TuiEvent::Char('n') | TuiEvent::Char('N') => self.start_wizard(),
            TuiEvent::Char('k') | TuiEvent::Char('K') => self.start_quick(),
            TuiEvent::Escape | TuiEvent::Char('q') => self.current_screen = Screen::Exit,
            _ => {}
        }
        false
    }

    /// 处理退出确认
    fn handle_exit(&mut self, event: TuiEvent) -> bool {
        match event {
            TuiEvent::Char('y') | TuiEvent::Char('Y') | TuiEvent::Enter => return true,
            TuiEvent::Char('n') | TuiEvent::Char('N') | TuiEvent::Escape => {
                self.current_screen = Screen::Home;
            }
            _ => {}
        }
        false
    }

    fn start_wizard(&mut self) {
        info!("Wizard opened");
        self.wizard = WizardState::new(self.config.uploads.clone());
        self.form.reset();
        self.current_screen = Screen::Wizard;
    }

    fn start_quick(&mut self) {
        info!("Quick quiz opened");
        self.quick = QuickQuiz::default();
        self.form.reset();
        self.current_screen = Screen::Quick;
    }

    /// 处理向导事件
    fn handle_wizard(&mut self, event: TuiEvent) {
        if self.form.is_in_input_mode() {
            self.handle_input(event);
            return;
        }

        if self.wizard.is_generating {
            if event == TuiEvent::Escape {
                self.cancel_generation();
            }
            return;
        }

        let items = FormItem::items_for(&self.wizard);
        let count = items.len();
        let selected = items.get(self.form.selected).copied();

        match event {
            TuiEvent::Up | TuiEvent::BackTab => self.form.prev(count),
            TuiEvent::Down | TuiEvent::Tab => self.form.next(count),
            TuiEvent::Left => self.cycle_option(selected, false),
            TuiEvent::Right => self.cycle_option(selected, true),
            TuiEvent::PageUp => self.form.scroll_up(),
            TuiEvent::PageDown => self.form.scroll_down(),
            TuiEvent::Enter => self.activate(selected),
            TuiEvent::Delete | TuiEvent::Backspace => self.remove_selected(selected),
            TuiEvent::Escape => self.go_back(),
            _ => {}
        }
    }

    /// 处理输入模式事件
    fn handle_input(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Enter if self.current_screen == Screen::Quick => self.commit_quick_input(),
            TuiEvent::Enter => self.commit_input(),
            TuiEvent::Escape => {
                self.form.exit_input_mode();
            }
            event => {
                let Some(input) = self.form.input.as_mut() else {
                    return;
                };
                match event {
                    TuiEvent::Char(c) => input.insert_char(c),
                    TuiEvent::Paste(text) => input.insert_str(&text),
                    TuiEvent::NewLine => input.insert_newline(),
                    TuiEvent::Backspace => input.delete_before_cursor(),
                    TuiEvent::Delete => input.delete_after_cursor(),
                    TuiEvent::Left => input.move_cursor_left(),
                    TuiEvent::Right => input.move_cursor_right(),
                    TuiEvent::Home => input.move_cursor_to_start(),
                    TuiEvent::End => input.move_cursor_to_end(),
                    _ => {}
                }
            }
        }
    }

    /// 应用输入内容
    fn commit_input(&mut self) {
        let item = self.form.selected_item(&self.wizard);
        let Some(value) = self.form.exit_input_mode() else {
            return;
        };

        match item {
            Some(FormItem::Title) => self.dispatch(Action::SetTitle(value)),
            Some(FormItem::Description) => self.dispatch(Action::SetDescription(value)),
            Some(FormItem::MaterialText) => self.dispatch(Action::SetMaterialText(value)),
            Some(FormItem::YoutubeUrl) => self.dispatch(Action::SetYoutubeUrl(value)),
            Some(FormItem::AddFile) => self.add_file(&value),
            _ => {}
        }
    }

    /// 读取文件信息并上传；路径可带引号（终端拖放）
    fn add_file(&mut self, raw: &str) {
        let path = raw.trim().trim_matches(|c: char| c == '"' || c == '\'');
        if path.is_empty() {
            return;
        }

        match read_upload(Path::new(path)) {
            Ok(file) => {
                let name = file.name.clone();
                self.dispatch(Action::AddUpload(file));
                if self.wizard.error.is_none() {
                    self.form.set_info(t!("file_added", name = name));
                } else {
                    self.form.status = None;
                }
            }
            Err(e) => {
                warn!(error = %e, "Upload could not be read");
                self.form.set_error(upload_error_text(&e));
            }
        }
    }

    /// 回车激活当前项
    fn activate(&mut self, item: Option<FormItem>) {
        let Some(item) = item else {
            return;
        };

        if item.is_input() {
            let value = match item {
                FormItem::Title => self.wizard.title.as_str(),
                FormItem::Description => self.wizard.description.as_str(),
                FormItem::MaterialText => self.wizard.material_text.as_str(),
                FormItem::YoutubeUrl => self.wizard.youtube_url.as_str(),
                _ => "",
            };
            self.form.enter_input_mode(value, item.is_multiline());
            return;
        }
        if item.is_option() {
            self.cycle_option(Some(item), true);
            return;
        }

        match item {
            FormItem::RemoveConfig(id) => self.dispatch(Action::RemoveConfig(id)),
            FormItem::AddConfig => {
                self.dispatch(Action::AddConfig);
                if let Some(id) = self.wizard.configs.entries().last().map(|c| c.id) {
                    let items = FormItem::items_for(&self.wizard);
                    self.form.focus(&items, FormItem::ConfigType(id));
                }
            }
            FormItem::Back => self.dispatch(Action::Retreat),
            FormItem::Continue => self.dispatch(Action::Advance),
            FormItem::ExportQuestions => self.export(false),
            FormItem::ExportAnswerKey => self.export(true),
            FormItem::NewQuiz => self.dispatch(Action::Restart),
            _ => {}
        }
    }

    /// 左右切换题型、数量、难度
    fn cycle_option(&mut self, item: Option<FormItem>, forward: bool) {
        let update = match item {
            Some(FormItem::ConfigType(id)) => self.wizard.configs.get(id).map(|c| {
                let next = if forward {
                    c.question_type.next()
                } else {
                    c.question_type.prev()
                };
                (id, ConfigUpdate::Type(next))
            }),
            Some(FormItem::ConfigQuantity(id)) => self.wizard.configs.get(id).map(|c| {
                let next = if forward {
                    next_quantity(c.quantity)
                } else {
                    prev_quantity(c.quantity)
                };
                (id, ConfigUpdate::Quantity(next))
            }),
            Some(FormItem::ConfigDifficulty(id)) => self.wizard.configs.get(id).map(|c| {
                let next = if forward {
                    c.difficulty.next()
                } else {
                    c.difficulty.prev()
                };
                (id, ConfigUpdate::Difficulty(next))
            }),
            _ => None,
        };

        if let Some((id, update)) = update {
            self.dispatch(Action::UpdateConfig(id, update));
        }
    }

    /// 删除当前文件或配置
    fn remove_selected(&mut self, item: Option<FormItem>) {
        match item {
            Some(FormItem::File(index)) => {
                self.dispatch(Action::RemoveUpload(index));
                self.form.status = None;
            }
            Some(
                FormItem::ConfigType(id)
                | FormItem::ConfigQuantity(id)
                | FormItem::ConfigDifficulty(id)
                | FormItem::RemoveConfig(id),
            ) => self.dispatch(Action::RemoveConfig(id)),
            _ => {}
        }
    }

    /// Esc：第一步与结果页回首页，其余步骤后退
    fn go_back(&mut self) {
        match self.wizard.step {
            WizardStep::Topic | WizardStep::Results => self.go_home(),
            WizardStep::Material | WizardStep::Configuration => self.dispatch(Action::Retreat),
        }
    }

    fn cancel_generation(&mut self) {
        if let Some(progress) = self.progress.take() {
            let cancelled = progress.cancel();
            self.finish_generation(Err(cancelled));
        }
    }

    /// 把生成结果交给发起它的屏幕
    fn finish_generation(&mut self, outcome: Result<Vec<Question>, GenerationError>) {
        match self.current_screen {
            Screen::Quick => {
                self.quick.finish(outcome);
                self.form.results_scroll = 0;
                self.form.clamp(QuickItem::items_for(&self.quick).len());
            }
            _ => self.dispatch(Action::GenerationFinished(outcome)),
        }
    }

    /// 处理快速出题事件
    fn handle_quick(&mut self, event: TuiEvent) {
        if self.form.is_in_input_mode() {
            self.handle_input(event);
            return;
        }

        if self.quick.is_generating {
            if event == TuiEvent::Escape {
                self.cancel_generation();
            }
            return;
        }

        let items = QuickItem::items_for(&self.quick);
        let count = items.len();
        let selected = items.get(self.form.selected).copied();

        match event {
            TuiEvent::Up | TuiEvent::BackTab => self.form.prev(count),
            TuiEvent::Down | TuiEvent::Tab => self.form.next(count),
            TuiEvent::Left => self.cycle_quick_option(selected, false),
            TuiEvent::Right => self.cycle_quick_option(selected, true),
            TuiEvent::PageUp => self.form.scroll_up(),
            TuiEvent::PageDown => self.form.scroll_down(),
            TuiEvent::Enter => self.activate_quick(selected),
            TuiEvent::Escape => self.go_home(),
            _ => {}
        }
    }

    fn activate_quick(&mut self, item: Option<QuickItem>) {
        match item {
            Some(QuickItem::Topic) => self.form.enter_input_mode(&self.quick.topic, false),
            Some(QuickItem::Material) => self.form.enter_input_mode(&self.quick.material, true),
            Some(item) if item.is_option() => self.cycle_quick_option(Some(item), true),
            Some(QuickItem::Generate) => {
                if let Some(request) = self.quick.start() {
                    let job = GenerationJob::spawn(
                        Arc::clone(&self.generator),
                        request,
                        self.config.generation.timeout(),
                    );
                    self.progress =
                        Some(GenerationProgress::new(job, self.config.generation.delay()));
                    self.form.status = None;
                }
            }
            Some(QuickItem::Reset) => {
                self.quick = QuickQuiz::default();
                self.form.reset();
            }
            _ => {}
        }
    }

    /// 左右切换难度、题型、数量
    fn cycle_quick_option(&mut self, item: Option<QuickItem>, forward: bool) {
        let quick = &mut self.quick;
        match item {
            Some(QuickItem::Difficulty) => {
                quick.difficulty = if forward {
                    quick.difficulty.next()
                } else {
                    quick.difficulty.prev()
                };
            }
            Some(QuickItem::QuestionType) => {
                quick.question_type = if forward {
                    quick.question_type.next()
                } else {
                    quick.question_type.prev()
                };
            }
            Some(QuickItem::Count) => quick.cycle_count(forward),
            _ => {}
        }
    }

    fn commit_quick_input(&mut self) {
        let item = QuickItem::items_for(&self.quick)
            .get(self.form.selected)
            .copied();
        let Some(value) = self.form.exit_input_mode() else {
            return;
        };
        match item {
            Some(QuickItem::Topic) => self.quick.topic = value,
            Some(QuickItem::Material) => self.quick.material = value,
            _ => {}
        }
    }

    /// 派发动作并执行副作用
    fn dispatch(&mut self, action: Action) {
        let step_before = self.wizard.step;

        if let Some(Effect::Generate(request)) = self.wizard.dispatch(action) {
            let job = GenerationJob::spawn(
                Arc::clone(&self.generator),
                request,
                self.config.generation.timeout(),
            );
            self.progress = Some(GenerationProgress::new(job, self.config.generation.delay()));
            self.form.status = None;
        }

        if self.wizard.step != step_before {
            self.form.reset();
        } else {
            self.form.clamp(FormItem::items_for(&self.wizard).len());
        }
    }

    /// 导出结果
    fn export(&mut self, include_answers: bool) {
        let doc = QuizDocument::new(
            &self.wizard.title,
            &self.wizard.description,
            self.wizard.generated.clone(),
        );
        let exporter = self
            .config
            .export
            .format
            .exporter(self.config.export.questions_per_page);

        match export_to_dir(
            exporter.as_ref(),
            &self.config.export.output_dir,
            &doc,
            include_answers,
        ) {
            Ok(path) => self
                .form
                .set_info(t!("export_saved", path = path.display())),
            Err(e) => {
                warn!(error = %e, "Export failed");
                self.form.set_error(t!("export_failed", error = e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::MockGenerator;
    use crate::quiz::{Difficulty, QuestionType};
    use crate::tui::state::StatusMessage;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn app() -> AppState {
        AppState::new(AppConfig::default(), Arc::new(MockGenerator::instant()))
    }

    fn type_text(app: &mut AppState, text: &str) {
        app.handle_event(TuiEvent::Enter);
        app.handle_event(TuiEvent::Paste(text.into()));
        app.handle_event(TuiEvent::Enter);
    }

    fn focus(app: &mut AppState, item: FormItem) {
        let items = FormItem::items_for(&app.wizard);
        app.form.focus(&items, item);
        assert_eq!(app.form.selected_item(&app.wizard), Some(item));
    }

    /// 从首页填写到配置步骤
    fn at_configuration() -> AppState {
        let mut app = app();
        app.handle_event(TuiEvent::Enter);
        assert_eq!(app.current_screen, Screen::Wizard);

        type_text(&mut app, "Fotosintesis");
        focus(&mut app, FormItem::Continue);
        app.handle_event(TuiEvent::Enter);
        assert_eq!(app.wizard.step, WizardStep::Material);

        type_text(&mut app, "Tumbuhan hijau mengubah cahaya menjadi energi.");
        focus(&mut app, FormItem::Continue);
        app.handle_event(TuiEvent::Enter);
        assert_eq!(app.wizard.step, WizardStep::Configuration);
        app
    }

    fn wait_for_generation(app: &mut AppState) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.wizard.is_generating {
            assert!(Instant::now() < deadline, "generation never finished");
            app.tick();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_home_menu_and_exit_confirm() {
        let mut app = app();
        app.handle_event(TuiEvent::Up);
        app.handle_event(TuiEvent::Enter);
        assert_eq!(app.current_screen, Screen::Exit);
        assert!(!app.handle_event(TuiEvent::Char('n')));
        assert_eq!(app.current_screen, Screen::Home);

        app.handle_event(TuiEvent::Escape);
        assert!(app.handle_event(TuiEvent::Char('y')));
    }

    fn open_quick(app: &mut AppState) {
        app.handle_event(TuiEvent::Down);
        app.handle_event(TuiEvent::Enter);
        assert_eq!(app.current_screen, Screen::Quick);
    }

    fn select_quick(app: &mut AppState, item: QuickItem) {
        let items = QuickItem::items_for(&app.quick);
        app.form.selected = items.iter().position(|i| *i == item).unwrap();
    }

    #[test]
    fn test_quick_quiz_generates_inline() {
        let mut app = app();
        open_quick(&mut app);

        // generate is inert without a topic
        select_quick(&mut app, QuickItem::Generate);
        app.handle_event(TuiEvent::Enter);
        assert!(app.progress.is_none());

        select_quick(&mut app, QuickItem::Topic);
        type_text(&mut app, "Fotosintesis");
        assert_eq!(app.quick.topic, "Fotosintesis");

        select_quick(&mut app, QuickItem::Count);
        app.handle_event(TuiEvent::Right);
        assert_eq!(app.quick.count, 10);
        select_quick(&mut app, QuickItem::Difficulty);
        app.handle_event(TuiEvent::Left);

        select_quick(&mut app, QuickItem::Generate);
        app.handle_event(TuiEvent::Enter);
        assert!(app.quick.is_generating);
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.quick.is_generating {
            assert!(Instant::now() < deadline, "generation never finished");
            app.tick();
            std::thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(app.current_screen, Screen::Quick);
        assert_eq!(app.quick.generated.len(), 10);
        assert!(app.quick.generated.iter().all(|q| q.difficulty == Difficulty::Easy));
        let types: Vec<_> = app.quick.generated.iter().map(|q| q.question_type).collect();
        assert!(types.contains(&QuestionType::MultipleChoice));
        assert!(types.contains(&QuestionType::FillBlank));
        assert!(types.contains(&QuestionType::TrueFalse));
        // the wizard is untouched
        assert_eq!(app.wizard.step, WizardStep::Topic);

        select_quick(&mut app, QuickItem::Reset);
        app.handle_event(TuiEvent::Enter);
        assert!(app.quick.generated.is_empty());
        assert!(app.quick.topic.is_empty());

        app.handle_event(TuiEvent::Escape);
        assert_eq!(app.current_screen, Screen::Home);
    }

    #[test]
    fn test_quick_quiz_cancel() {
        let mut app = AppState::new(
            AppConfig::default(),
            Arc::new(MockGenerator::new(Duration::from_secs(2))),
        );
        open_quick(&mut app);
        type_text(&mut app, "Fotosintesis");
        select_quick(&mut app, QuickItem::Generate);
        app.handle_event(TuiEvent::Enter);
        assert!(app.progress.is_some());

        app.handle_event(TuiEvent::Escape);
        assert!(app.progress.is_none());
        assert!(!app.quick.is_generating);
        assert_eq!(app.quick.error, Some(GenerationError::Cancelled));
        assert_eq!(app.current_screen, Screen::Quick);
    }

    #[test]
    fn test_continue_is_inert_without_title() {
        let mut app = app();
        app.handle_event(TuiEvent::Enter);
        focus(&mut app, FormItem::Continue);
        app.handle_event(TuiEvent::Enter);
        assert_eq!(app.wizard.step, WizardStep::Topic);
    }

    #[test]
    fn test_escape_cancels_editing_without_saving() {
        let mut app = app();
        app.handle_event(TuiEvent::Enter);
        app.handle_event(TuiEvent::Enter);
        app.handle_event(TuiEvent::Char('X'));
        app.handle_event(TuiEvent::Escape);
        assert!(app.wizard.title.is_empty());
        assert_eq!(app.current_screen, Screen::Wizard);

        // Esc outside input mode on the first step goes home
        app.handle_event(TuiEvent::Escape);
        assert_eq!(app.current_screen, Screen::Home);
    }

    #[test]
    fn test_enter_opens_editor_matching_field() {
        let mut app = app();
        app.handle_event(TuiEvent::Enter);
        app.handle_event(TuiEvent::Enter);
        assert!(app.form.input.as_ref().is_some_and(|i| !i.is_multiline()));
        app.handle_event(TuiEvent::Escape);

        focus(&mut app, FormItem::Description);
        app.handle_event(TuiEvent::Enter);
        assert!(app.form.input.as_ref().is_some_and(|i| i.is_multiline()));
    }

    #[test]
    fn test_multiline_material_input() {
        let mut app = at_configuration();
        app.handle_event(TuiEvent::Escape);
        assert_eq!(app.wizard.step, WizardStep::Material);

        focus(&mut app, FormItem::MaterialText);
        app.handle_event(TuiEvent::Enter);
        app.handle_event(TuiEvent::NewLine);
        app.handle_event(TuiEvent::Char('2'));
        app.handle_event(TuiEvent::Enter);
        assert!(app.wizard.material_text.ends_with("energi.\n2"));
    }

    #[test]
    fn test_configuration_editing() {
        let mut app = at_configuration();
        let first = app.wizard.configs.entries()[0].id;

        focus(&mut app, FormItem::ConfigQuantity(first));
        app.handle_event(TuiEvent::Right);
        assert_eq!(app.wizard.total_questions(), 10);

        focus(&mut app, FormItem::ConfigDifficulty(first));
        app.handle_event(TuiEvent::Left);
        assert_eq!(app.wizard.configs.get(first).unwrap().difficulty, Difficulty::Easy);

        focus(&mut app, FormItem::AddConfig);
        app.handle_event(TuiEvent::Enter);
        assert_eq!(app.wizard.configs.len(), 2);
        let second = app.wizard.configs.entries()[1].id;
        assert_eq!(
            app.form.selected_item(&app.wizard),
            Some(FormItem::ConfigType(second))
        );
        app.handle_event(TuiEvent::Right);
        assert_eq!(
            app.wizard.configs.get(second).unwrap().question_type,
            QuestionType::Essay
        );
        assert_eq!(app.wizard.total_questions(), 15);

        app.handle_event(TuiEvent::Delete);
        assert_eq!(app.wizard.configs.len(), 1);

        // the last entry survives a delete
        focus(&mut app, FormItem::ConfigType(first));
        app.handle_event(TuiEvent::Delete);
        assert_eq!(app.wizard.configs.len(), 1);
    }

    #[test]
    fn test_generate_shows_results_then_restart() {
        let mut app = at_configuration();
        focus(&mut app, FormItem::Continue);
        app.handle_event(TuiEvent::Enter);
        assert!(app.wizard.is_generating);
        assert!(app.progress.is_some());

        // input is ignored while generating
        app.handle_event(TuiEvent::Up);
        wait_for_generation(&mut app);

        assert_eq!(app.wizard.step, WizardStep::Results);
        assert_eq!(app.wizard.generated.len(), 5);
        assert!(app.progress.is_none());

        focus(&mut app, FormItem::NewQuiz);
        app.handle_event(TuiEvent::Enter);
        assert_eq!(app.wizard.step, WizardStep::Topic);
        assert!(app.wizard.title.is_empty());
        assert!(app.wizard.generated.is_empty());
    }

    #[test]
    fn test_escape_cancels_generation() {
        let mut app = AppState::new(
            AppConfig::default(),
            Arc::new(MockGenerator::new(Duration::from_secs(2))),
        );
        app.handle_event(TuiEvent::Enter);
        type_text(&mut app, "Fotosintesis");
        focus(&mut app, FormItem::Continue);
        app.handle_event(TuiEvent::Enter);
        type_text(&mut app, "materi");
        focus(&mut app, FormItem::Continue);
        app.handle_event(TuiEvent::Enter);
        focus(&mut app, FormItem::Continue);
        app.handle_event(TuiEvent::Enter);
        assert!(app.wizard.is_generating);

        app.handle_event(TuiEvent::Escape);
        assert!(!app.wizard.is_generating);
        assert!(app.progress.is_none());
        assert_eq!(app.wizard.step, WizardStep::Configuration);
        assert!(app.wizard.error.is_some());
    }

    #[test]
    fn test_add_and_remove_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bab1.txt");
        std::fs::write(&path, "fotosintesis").unwrap();

        let mut app = at_configuration();
        app.handle_event(TuiEvent::Escape);
        focus(&mut app, FormItem::AddFile);
        type_text(&mut app, &format!("'{}'", path.display()));
        assert_eq!(app.wizard.uploads.len(), 1);
        assert!(matches!(app.form.status, Some(StatusMessage::Info(_))));

        focus(&mut app, FormItem::AddFile);
        type_text(&mut app, &dir.path().join("missing.pdf").display().to_string());
        assert!(matches!(app.form.status, Some(StatusMessage::Error(_))));

        focus(&mut app, FormItem::File(0));
        app.handle_event(TuiEvent::Delete);
        assert!(app.wizard.uploads.is_empty());
    }

    #[test]
    fn test_export_from_results() {
        let dir = TempDir::new().unwrap();
        let mut app = at_configuration();
        app.config.export.output_dir = dir.path().to_path_buf();

        focus(&mut app, FormItem::Continue);
        app.handle_event(TuiEvent::Enter);
        wait_for_generation(&mut app);

        focus(&mut app, FormItem::ExportAnswerKey);
        app.handle_event(TuiEvent::Enter);
        assert!(matches!(app.form.status, Some(StatusMessage::Info(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

        app.handle_event(TuiEvent::Escape);
        assert_eq!(app.current_screen, Screen::Home);
    }
}
