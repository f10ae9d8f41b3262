use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{AreaState, Dispatch, KSelector, Outcome, SUBMIT_KEY, UiEvent};
use crate::chart::ChartBuilder;
use crate::dataset::DatasetResult;
use crate::fetcher::ResultFetcher;
use crate::view::{ChartArea, RenderError};

pub const LOADING_MESSAGE: &str = "Loading data...";
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data. Is the API running?";
pub const GENERATE_ERROR_MESSAGE: &str = "Error generating new data.";

/// Used when the k input does not hold an integer
pub const DEFAULT_K: u32 = 3;

/// Chart area plus its pipeline state; always locked together
struct Stage<A> {
    area: A,
    state: AreaState,
}

/// Drives fetch → clear → build → render cycles against one chart area
///
/// The controller is the only owner of the area, so it is the only place
/// charts are created or destroyed. Methods take `&self`; overlapping
/// invocations are ordered by a generation counter and only the most
/// recently started one may touch the area when its response lands.
pub struct ViewController<F, A> {
    fetcher: F,
    stage: Mutex<Stage<A>>,
    builder: ChartBuilder,
    k_input: Mutex<KSelector>,
    default_k: u32,
    generation: AtomicU64,
}

impl<F, A> ViewController<F, A>
where
    F: ResultFetcher,
    A: ChartArea,
{
    pub fn new(fetcher: F, area: A) -> Self {
        Self {
            fetcher,
            stage: Mutex::new(Stage {
                area,
                state: AreaState::Idle,
            }),
            builder: ChartBuilder::default(),
            k_input: Mutex::new(KSelector::default()),
            default_k: DEFAULT_K,
            generation: AtomicU64::new(0),
        }
    }

    pub fn chart_builder(mut self, builder: ChartBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn default_k(mut self, k: u32) -> Self {
        self.default_k = k;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn state(&self) -> AreaState {
        self.stage.lock().state
    }

    /// Run `f` with exclusive access to the chart area
    pub fn with_area<R>(&self, f: impl FnOnce(&mut A) -> R) -> R {
        f(&mut self.stage.lock().area)
    }

    pub fn into_area(self) -> A {
        self.stage.into_inner().area
    }

    pub fn set_k_input(&self, text: impl Into<String>) {
        self.k_input.lock().set(text);
    }

    /// The k the next fetch will request
    pub fn selected_k(&self) -> u32 {
        let input = self.k_input.lock();
        match input.parse() {
            Some(k) => k,
            None => {
                tracing::warn!(input = input.text(), default = self.default_k, "k input is not an integer");
                self.default_k
            }
        }
    }

    /// Route one user action to the pipeline
    pub async fn dispatch(&self, event: UiEvent) -> Dispatch {
        match event {
            UiEvent::FetchClicked => Dispatch::ran(self.submit().await),
            UiEvent::GenerateClicked => Dispatch::ran(self.generate_and_fetch().await),
            UiEvent::KeyPress { key } if key == SUBMIT_KEY => {
                Dispatch::ran(self.submit().await).prevented()
            }
            UiEvent::KeyPress { .. } => Dispatch::ignored(),
            UiEvent::KInput(text) => {
                self.set_k_input(text);
                Dispatch::ignored()
            }
        }
    }

    async fn submit(&self) -> Outcome {
        self.fetch_and_render(self.selected_k()).await
    }

    /// One full refresh: loading placeholder, fetch, then replace every chart
    pub async fn fetch_and_render(&self, k: u32) -> Outcome {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut stage = self.stage.lock();
            stage.area.show_loading(LOADING_MESSAGE);
            stage.state = AreaState::Loading;
            present(&mut stage.area);
        }

        let response = self.fetcher.aggregate(k).await;

        let mut stage = self.stage.lock();
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, k, "dropping superseded response");
            return Outcome::Superseded;
        }

        let outcome = match response {
            Ok(datasets) => match render_all(&mut stage.area, &self.builder, &datasets) {
                Ok(charts) => {
                    tracing::debug!(k, charts, "rendered datasets");
                    Outcome::Rendered { charts }
                }
                Err(e) => {
                    tracing::error!(error = %e, "rendering failed");
                    stage.area.show_error(FETCH_ERROR_MESSAGE);
                    Outcome::ErrorDisplayed
                }
            },
            Err(e) => {
                tracing::error!(status = ?e.status(), error = %e, k, "aggregation request failed");
                stage.area.show_error(FETCH_ERROR_MESSAGE);
                Outcome::ErrorDisplayed
            }
        };

        if let Err(e) = stage.area.present() {
            tracing::error!(error = %e, "failed to present chart area");
            stage.area.show_error(FETCH_ERROR_MESSAGE);
            stage.state = AreaState::ErrorDisplayed;
            present(&mut stage.area);
            return Outcome::ErrorDisplayed;
        }

        stage.state = match outcome {
            Outcome::Rendered { .. } => AreaState::Rendered,
            _ => AreaState::ErrorDisplayed,
        };
        outcome
    }

    /// Ask the server for new source data, then refetch with the selected k
    pub async fn generate_and_fetch(&self) -> Outcome {
        match self.fetcher.generate().await {
            Ok(()) => self.submit().await,
            Err(e) => {
                tracing::error!(status = ?e.status(), error = %e, "generate request failed");
                let mut stage = self.stage.lock();
                stage.area.alert(GENERATE_ERROR_MESSAGE);
                present(&mut stage.area);
                Outcome::Alerted
            }
        }
    }
}

/// Destroy old charts and mount one per dataset, with no await in between
fn render_all<A: ChartArea>(
    area: &mut A,
    builder: &ChartBuilder,
    datasets: &[DatasetResult],
) -> Result<usize, RenderError> {
    area.clear();
    for dataset in datasets {
        let spec = builder.build_dataset(dataset);
        area.mount(&spec)?;
    }
    Ok(datasets.len())
}

fn present<A: ChartArea>(area: &mut A) {
    if let Err(e) = area.present() {
        tracing::error!(error = %e, "failed to present chart area");
    }
}
