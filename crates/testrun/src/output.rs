use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use testrun_args::{ArgumentError, Configuration, Filters, Project};

pub struct Output {
    stream: Box<dyn WriteColor>,
}

impl Output {
    pub fn new(color: bool) -> Self {
        Self::with_writer(StandardStream::stdout(color_choice(color)))
    }

    pub fn stderr(color: bool) -> Self {
        Self::with_writer(StandardStream::stderr(color_choice(color)))
    }

    pub fn with_writer(writer: impl WriteColor + 'static) -> Self {
        Self {
            stream: Box::new(writer),
        }
    }

    fn set_color(&mut self, color: Color) {
        let _ = self.stream.set_color(ColorSpec::new().set_fg(Some(color)));
    }

    fn set_bold(&mut self) {
        let _ = self.stream.set_color(ColorSpec::new().set_bold(true));
    }

    fn set_dim(&mut self) {
        let _ = self.stream.set_color(ColorSpec::new().set_dimmed(true));
    }

    fn reset(&mut self) {
        let _ = self.stream.reset();
    }

    pub fn print_banner(&mut self) -> io::Result<()> {
        self.set_bold();
        write!(self.stream, "testrun v{}", env!("CARGO_PKG_VERSION"))?;
        self.reset();
        self.set_dim();
        writeln!(self.stream, " ({}-bit)", usize::BITS)?;
        self.reset();
        writeln!(self.stream)
    }

    pub fn print_usage(&mut self, rows: &[(String, String)]) -> io::Result<()> {
        writeln!(
            self.stream,
            "usage: testrun <assemblyFile> [configFile] [options]"
        )?;
        writeln!(self.stream)?;
        writeln!(
            self.stream,
            "Config files must end in .json. Switches are case-insensitive."
        )?;
        writeln!(self.stream)?;
        self.set_bold();
        writeln!(self.stream, "Options")?;
        self.reset();

        let width = rows.iter().map(|(switch, _)| switch.len()).max().unwrap_or(0);
        for (switch, description) in rows {
            write!(self.stream, "  ")?;
            self.set_color(Color::Cyan);
            write!(self.stream, "{:<width$}", switch, width = width)?;
            self.reset();
            writeln!(self.stream, " : {}", description)?;
        }
        Ok(())
    }

    pub fn print_error(&mut self, error: &ArgumentError) -> io::Result<()> {
        self.set_color(Color::Red);
        self.set_bold();
        write!(self.stream, "error:")?;
        self.reset();
        writeln!(self.stream, " {}", error)?;
        self.stream.flush()
    }

    pub fn prompt(&mut self, message: &str) -> io::Result<()> {
        self.set_dim();
        write!(self.stream, "{}", message)?;
        self.reset();
        self.stream.flush()
    }

    pub fn print_project(&mut self, project: &Project, debug: bool) -> io::Result<()> {
        if debug {
            self.set_dim();
            writeln!(self.stream, "{:#?}", project)?;
            self.reset();
            return Ok(());
        }

        for assembly in project.assemblies() {
            self.print_label("Assembly")?;
            writeln!(self.stream, "{}", assembly.assembly_file.display())?;
            if let Some(config_file) = &assembly.config_file {
                self.print_label("  Config")?;
                writeln!(self.stream, "{}", config_file.display())?;
            }
            self.print_settings(&assembly.configuration)?;
            self.print_filters(&assembly.configuration.filters)?;
        }

        self.print_label("Reporter")?;
        writeln!(
            self.stream,
            "{}",
            project.reporter().switch_name().unwrap_or("default")
        )?;

        for (id, path) in project.outputs() {
            self.print_label("  Output")?;
            writeln!(self.stream, "{} -> {}", id, path.display())?;
        }
        Ok(())
    }

    fn print_label(&mut self, label: &str) -> io::Result<()> {
        self.set_bold();
        write!(self.stream, "{}: ", label)?;
        self.reset();
        Ok(())
    }

    fn print_settings(&mut self, config: &Configuration) -> io::Result<()> {
        let flags = [
            ("diagnostics", config.diagnostic_messages_or_default()),
            ("internal diagnostics", config.internal_diagnostic_messages_or_default()),
            ("fail skips", config.fail_skips_or_default()),
            ("ignore failures", config.ignore_failures_or_default()),
            ("pre-enumerate theories", config.pre_enumerate_theories_or_default()),
            ("stop on fail", config.stop_on_fail_or_default()),
        ];
        for (name, _) in flags.iter().filter(|(_, enabled)| *enabled) {
            self.print_label("  Option")?;
            writeln!(self.stream, "{}", name)?;
        }

        if let Some(culture) = &config.culture {
            self.print_label("  Culture")?;
            writeln!(
                self.stream,
                "{}",
                if culture.is_empty() { "invariant" } else { culture.as_str() }
            )?;
        }
        if let Some(parallel) = config.parallelize_test_collections {
            self.print_label("  Parallel")?;
            writeln!(self.stream, "{}", if parallel { "collections" } else { "none" })?;
        }
        if let Some(threads) = config.max_parallel_threads {
            self.print_label("  Max threads")?;
            if threads < 0 {
                writeln!(self.stream, "unlimited")?;
            } else {
                writeln!(self.stream, "{}", threads)?;
            }
        }
        Ok(())
    }

    fn print_filters(&mut self, filters: &Filters) -> io::Result<()> {
        if filters.is_empty() {
            return Ok(());
        }

        let sets = [
            ("-namespace", &filters.included_namespaces),
            ("-nonamespace", &filters.excluded_namespaces),
            ("-class", &filters.included_classes),
            ("-noclass", &filters.excluded_classes),
            ("-method", &filters.included_methods),
            ("-nomethod", &filters.excluded_methods),
        ];
        for (switch, values) in sets {
            for value in values {
                self.print_label("  Filter")?;
                writeln!(self.stream, "{} {}", switch, value)?;
            }
        }

        let traits = [
            ("-trait", &filters.included_traits),
            ("-notrait", &filters.excluded_traits),
        ];
        for (switch, map) in traits {
            for (name, values) in map {
                for value in values {
                    self.print_label("  Filter")?;
                    writeln!(self.stream, "{} {}={}", switch, name, value)?;
                }
            }
        }
        Ok(())
    }
}

fn color_choice(color: bool) -> ColorChoice {
    if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
