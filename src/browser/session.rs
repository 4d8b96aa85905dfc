use crate::{browser::config::{ConnectionOptions, LaunchOptions},
            dom::PageSnapshot,
            error::{FocusError, Result},
            salience::{Annotator, FocusChain, ScoreWeights},
            tools::{ToolContext, ToolRegistry}};
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session that manages a Chrome/Chromium instance
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// Tool registry for executing annotation tools
    tool_registry: ToolRegistry,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Set the browser's idle timeout to 1 hour (default is 30 seconds) to prevent the session from closing too soon
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        // Configure headless mode
        launch_opts.headless = options.headless;

        // Set window size
        launch_opts.window_size = Some((options.window_width, options.window_height));

        // Set Chrome binary path if provided
        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        // Set user data directory if provided
        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        // Set sandbox mode
        launch_opts.sandbox = options.sandbox;

        // Launch browser
        let browser = Browser::new(launch_opts).map_err(|e| FocusError::LaunchFailed(e.to_string()))?;

        browser.new_tab().map_err(|e| FocusError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser, tool_registry: ToolRegistry::with_defaults() })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect(options.ws_url).map_err(|e| FocusError::ConnectionFailed(e.to_string()))?;

        Ok(Self { browser, tool_registry: ToolRegistry::with_defaults() })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    /// Get the active tab
    pub fn tab(&self) -> Result<Arc<Tab>> {
        self.get_active_tab()
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| FocusError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the currently active tab by checking the document visibility and focus state
    pub fn get_active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        // First pass: check for both visibility and focus (strongest signal)
        for tab in &tabs {
            let result = tab.evaluate("document.visibilityState === 'visible' && document.hasFocus()", false);
            match result {
                Ok(remote_object) => {
                    if let Some(value) = remote_object.value {
                        if value.as_bool().unwrap_or(false) {
                            return Ok(tab.clone());
                        }
                    }
                }
                Err(e) => {
                    log::debug!("Failed to check tab status: {}", e);
                    continue;
                }
            }
        }

        // Second pass: check just for visibility (weaker signal, but better than nothing)
        for tab in &tabs {
            let result = tab.evaluate("document.visibilityState === 'visible'", false);
            match result {
                Ok(remote_object) => {
                    if let Some(value) = remote_object.value {
                        if value.as_bool().unwrap_or(false) {
                            return Ok(tab.clone());
                        }
                    }
                }
                Err(_) => continue,
            }
        }

        Err(FocusError::TabOperationFailed("No active tab found".to_string()))
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate to a URL using the active tab
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?
            .navigate_to(url)
            .map_err(|e| FocusError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| FocusError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Capture a snapshot of the rendered page
    ///
    /// Evaluates the extraction script in the active tab and parses the
    /// returned JSON into an immutable [`PageSnapshot`].
    pub fn capture_snapshot(&self) -> Result<PageSnapshot> {
        let js_code = include_str!("snapshot.js");

        let result = self
            .tab()?
            .evaluate(js_code, false)
            .map_err(|e| FocusError::SnapshotFailed(format!("Failed to execute extraction script: {}", e)))?;

        let json_value = result
            .value
            .ok_or_else(|| FocusError::SnapshotFailed("No value returned from extraction script".to_string()))?;

        // The script returns a JSON string, so unwrap that first
        let json_str: String = serde_json::from_value(json_value)
            .map_err(|e| FocusError::SnapshotFailed(format!("Failed to get JSON string: {}", e)))?;

        PageSnapshot::parse(&json_str)
            .map_err(|e| FocusError::SnapshotFailed(format!("Failed to parse snapshot JSON: {}", e)))
    }

    /// Run the salience selection over the current page and mark the result
    ///
    /// Captures a snapshot, selects the focal chain with the given weights,
    /// applies outlines and index badges to the live page, and returns the
    /// chain.
    pub fn annotate(&self, weights: ScoreWeights) -> Result<FocusChain> {
        let snapshot = self.capture_snapshot()?;
        let chain = Annotator::new(weights).annotate(&snapshot);

        log::info!(
            "selected {} focal element(s) across {} node(s)",
            chain.len(),
            snapshot.len()
        );

        self.apply_annotations(&chain)?;
        Ok(chain)
    }

    /// Apply a previously computed chain to the live page
    ///
    /// One evaluated pass sets outlines and prepends index badges; the
    /// terminal container, if any, gets the dead-end mark.
    pub fn apply_annotations(&self, chain: &FocusChain) -> Result<()> {
        let annotations: Vec<serde_json::Value> = chain
            .annotations()
            .map(|a| {
                serde_json::json!({
                    "selector": a.css_path,
                    "label": a.index,
                    "outline": [a.outline.0, a.outline.1, a.outline.2],
                })
            })
            .collect();

        let payload = serde_json::json!({
            "annotations": annotations,
            "terminal": chain.terminal().map(|t| serde_json::json!({ "selector": t.css_path })),
        });

        let js_code = include_str!("annotate.js").replace("__FOCUS_PAYLOAD__", &payload.to_string());

        let result = self
            .tab()?
            .evaluate(&js_code, false)
            .map_err(|e| FocusError::EvaluationFailed(format!("Failed to apply annotations: {}", e)))?;

        let applied = result.value.and_then(|v| v.as_u64()).unwrap_or(0);
        let expected = chain.len() as u64 + u64::from(chain.terminal().is_some());
        if applied < expected {
            log::warn!("applied {} of {} annotation(s); some selectors did not resolve", applied, expected);
        }

        Ok(())
    }

    /// Remove all annotations previously applied to the page
    pub fn clear_annotations(&self) -> Result<u64> {
        let js_code = include_str!("clear.js");

        let result = self
            .tab()?
            .evaluate(js_code, false)
            .map_err(|e| FocusError::EvaluationFailed(format!("Failed to clear annotations: {}", e)))?;

        Ok(result.value.and_then(|v| v.as_u64()).unwrap_or(0))
    }

    /// Capture a PNG screenshot of the current page
    pub fn screenshot_png(&self) -> Result<Vec<u8>> {
        self.tab()?
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| FocusError::TabOperationFailed(format!("Failed to capture screenshot: {}", e)))
    }

    /// Get the tool registry
    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Execute a tool by name
    pub fn execute_tool(&self, name: &str, params: serde_json::Value) -> Result<crate::tools::ToolResult> {
        let mut context = ToolContext::new(self);
        self.tool_registry.execute(name, params, &mut context)
    }

    /// Close the browser
    pub fn close(&self) -> Result<()> {
        // The browser shuts down when the Browser instance is dropped;
        // closing the tabs is the strongest explicit shutdown available
        let tabs = self.get_tabs()?;
        for tab in tabs {
            let _ = tab.close(false); // Ignore errors on individual tab closes
        }
        Ok(())
    }
}
